//! Integration tests for fileroutes-router
//!
//! Tests are organized by feature area and cover:
//! - Matching order and converters
//! - Named routes and URL generation
//! - Routers compiled from route directories with `PathAdapter`

use fileroutes::{Discovery, RoutesConfig, Value};
use fileroutes_router::*;
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn view(module: &str) -> ViewHandle {
    ViewHandle::Function {
        module: module.to_string(),
        name: "view".to_string(),
    }
}

fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn tree(files: &[&str]) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    for file in files {
        let path = dir.path().join(file);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "pub fn view() {}").unwrap();
    }
    dir
}

fn compile(root: &Path) -> Router {
    let config = RoutesConfig::default().with_sorted_entries(true);
    let compiled = Discovery::new(PathAdapter)
        .routes_config(config)
        .compile_dir(root)
        .unwrap();
    Router::from(compiled)
}

// ========================================================================
// Matching
// ========================================================================

#[test]
fn test_static_route() {
    let route = Route::new("about", view("routes::about"));
    assert!(route.matches("/about").is_some());
    assert!(route.matches("/about/").is_none());
    assert!(route.matches("/other").is_none());
    assert!(route.matches("/about/more").is_none());
}

#[test]
fn test_root_route() {
    let route = Route::new("", view("routes::index"));
    assert_eq!(route.matches("/"), Some(Params::new()));
    assert!(route.matches("/about").is_none());
}

#[test]
fn test_first_match_wins() {
    let router = Router::new()
        .with_route(Route::new("<str:slug>", view("routes::[slug]")))
        .with_route(Route::new("about", view("routes::about")));

    // table order is authoritative, even over a literal route
    let matched = router.match_route("/about").unwrap();
    assert_eq!(matched.route.pattern, "<str:slug>");
}

#[test]
fn test_typed_params() {
    let route = Route::new("blog/<int:year>/<int:month>/<str:slug>", view("routes::blog"));
    let params = route.matches("/blog/2022/01/test").unwrap();

    assert_eq!(params.get("year"), Some(&ParamValue::Int(2022)));
    assert_eq!(params.get("month"), Some(&ParamValue::Int(1)));
    assert_eq!(params.get("slug"), Some(&ParamValue::Text("test".to_string())));
}

#[rstest]
#[case("users/<int:id>", "/users/42", true)]
#[case("users/<int:id>", "/users/abc", false)]
#[case("posts/<slug:title>", "/posts/hello-world", true)]
#[case("posts/<slug:title>", "/posts/hello.world", false)]
#[case("items/<uuid:id>", "/items/550e8400-e29b-41d4-a716-446655440000", true)]
#[case("items/<uuid:id>", "/items/42", false)]
#[case("files/<path:rest>", "/files/a/b/c.txt", true)]
#[case("files/<path:rest>", "/files", false)]
fn test_converters(#[case] pattern: &str, #[case] path: &str, #[case] matches: bool) {
    let route = Route::new(pattern, view("routes::x"));
    assert_eq!(route.matches(path).is_some(), matches);
}

#[test]
fn test_path_converter_backtracks() {
    let route = Route::new("files/<path:rest>/edit", view("routes::edit"));
    let params = route.matches("/files/a/b/edit").unwrap();
    assert_eq!(params.get("rest"), Some(&ParamValue::Text("a/b".to_string())));
    assert!(route.matches("/files/edit").is_none());
}

#[test]
fn test_query_string_ignored() {
    let route = Route::new("search", view("routes::search"));
    assert!(route.matches("/search?q=rust").is_some());
}

#[test]
fn test_trailing_slash_separates_index_from_file() {
    let router = Router::new()
        .with_route(Route::new("docs", view("routes::docs")))
        .with_route(Route::new("docs/", view("routes::docs::index")));

    assert_eq!(router.match_route("/docs").unwrap().route.pattern, "docs");
    assert_eq!(router.match_route("/docs/").unwrap().route.pattern, "docs/");
    assert_eq!(router.match_route("/docs/?tab=1").unwrap().route.pattern, "docs/");
}

#[test]
fn test_match_exposes_kwargs() {
    let kwargs = BTreeMap::from([("template".to_string(), Value::Text("home.html".to_string()))]);
    let router = Router::new().with_route(Route::new("home", view("routes::home")).with_kwargs(kwargs.clone()));
    assert_eq!(router.match_route("/home").unwrap().kwargs(), &kwargs);
}

// ========================================================================
// Named Routes
// ========================================================================

#[test]
fn test_url_for() {
    let router = Router::new()
        .with_route(Route::new("", view("routes::index")).with_name("home"))
        .with_route(Route::new("docs/", view("routes::docs::index")).with_name("docs"))
        .with_route(Route::new("blog/<int:year>/<slug:slug>", view("routes::blog")).with_name("post"));

    assert_eq!(router.url_for("home", &HashMap::new()).as_deref(), Some("/"));
    assert_eq!(router.url_for("docs", &HashMap::new()).as_deref(), Some("/docs/"));
    assert_eq!(
        router
            .url_for("post", &params(&[("year", "2022"), ("slug", "hello")]))
            .as_deref(),
        Some("/blog/2022/hello")
    );
}

#[test]
fn test_url_for_rejects_bad_params() {
    let router = Router::new()
        .with_route(Route::new("users/<int:id>", view("routes::users")).with_name("user"));

    assert_eq!(router.url_for("user", &HashMap::new()), None);
    assert_eq!(router.url_for("user", &params(&[("id", "abc")])), None);
    assert_eq!(router.url_for("missing", &params(&[("id", "1")])), None);
}

// ========================================================================
// Compiled Routers
// ========================================================================

#[test]
fn test_compiled_blog_route() {
    let dir = tree(&["blog/[int_year]/[int_month]/[slug].rs"]);
    let router = compile(dir.path());

    let matched = router.match_route("/blog/2022/01/test").unwrap();
    assert_eq!(matched.params.get("year").and_then(ParamValue::as_int), Some(2022));
    assert_eq!(matched.params.get("month").and_then(ParamValue::as_int), Some(1));
    assert_eq!(matched.params.get("slug").and_then(ParamValue::as_str), Some("test"));
}

#[test]
fn test_compiled_literal_beats_wildcard() {
    let dir = tree(&["[str].rs", "normal.rs"]);
    let router = compile(dir.path());

    let patterns: Vec<&str> = router.routes().iter().map(|r| r.pattern.as_str()).collect();
    assert_eq!(patterns, vec!["normal", "<str:str>"]);

    assert_eq!(router.match_route("/normal").unwrap().view().module().rsplit("::").next(), Some("normal"));
    let other = router.match_route("/anything").unwrap();
    assert_eq!(other.params.get("str"), Some(&ParamValue::Text("anything".to_string())));
}

#[test]
fn test_compiled_index_routes() {
    let dir = tree(&["index.rs", "docs/index.rs"]);
    let router = compile(dir.path());

    assert_eq!(router.match_route("/").unwrap().route.pattern, "");
    assert_eq!(router.match_route("/docs/").unwrap().route.pattern, "docs/");
    assert!(router.match_route("/docs").is_none());
    assert!(router.match_route("/missing").is_none());
}

#[test]
fn test_compiled_index_beside_same_named_file() {
    let dir = tree(&["docs.rs", "docs/index.rs"]);
    let router = compile(dir.path());

    let patterns: Vec<&str> = router.routes().iter().map(|r| r.pattern.as_str()).collect();
    assert_eq!(patterns, vec!["docs", "docs/"]);

    let index = router.match_route("/docs/").unwrap();
    assert_eq!(index.route.pattern, "docs/");
    assert!(index.view().module().ends_with("docs::index"));

    let file = router.match_route("/docs").unwrap();
    assert!(file.view().module().ends_with("::docs"));
}

#[test]
fn test_compiled_view_paths_start_at_root() {
    let dir = tree(&["routes/blog/index.rs", "routes/about.rs"]);
    let router = compile(&dir.path().join("routes"));

    assert_eq!(
        router.match_route("/about").unwrap().view().path(),
        "routes::about::view"
    );
    assert_eq!(
        router.match_route("/blog/").unwrap().view().path(),
        "routes::blog::index::view"
    );
}

#[test]
fn test_compiled_class_view_and_name() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("home.rs"),
        r#"
        pub const ROUTE_NAME: &str = "home";

        pub struct HomeView;

        impl fileroutes_router::View for HomeView {}
        "#,
    )
    .unwrap();
    let router = compile(dir.path());

    let route = router.get_route_by_name("home").unwrap();
    assert!(route.view.is_class());
    assert!(route.view.path().ends_with("home::HomeView"));
    assert_eq!(router.url_for("home", &HashMap::new()).as_deref(), Some("/home"));
}
