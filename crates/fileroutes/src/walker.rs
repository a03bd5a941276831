// File: src/walker.rs
// Purpose: Walks a routes directory and synthesizes route descriptors

use std::collections::VecDeque;
use std::ffi::{OsStr, OsString};
use std::path::{Component, Path, PathBuf};

use walkdir::{DirEntry, FilterEntry, WalkDir};

use crate::adapter::FrameworkAdapter;
use crate::config::RoutesConfig;
use crate::diagnostics::{Diagnostic, DiagnosticCode};
use crate::error::{Error, Result};
use crate::route::{RouteDescriptor, INDEX_STEM};
use crate::segment::{Expanded, SegmentTransformer};

/// Build and tooling directories never visited
pub const IGNORED_DIRECTORIES: &[&str] = &["target", ".git"];

/// Module markers that never become routes
pub const SKIPPED_STEMS: &[&str] = &["mod", "__init__"];

// https://stackoverflow.com/q/1976007
const FORBIDDEN_FILENAME_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Characters in `stem` that are not allowed on every supported platform
///
/// Each offending character is reported once, in order of appearance.
pub fn invalid_characters(stem: &str) -> Vec<char> {
    stem.chars().fold(Vec::new(), |mut found, c| {
        if FORBIDDEN_FILENAME_CHARS.contains(&c) && !found.contains(&c) {
            found.push(c);
        }
        found
    })
}

fn is_visited(entry: &DirEntry) -> bool {
    entry.depth() == 0
        || !entry.file_type().is_dir()
        || !entry
            .file_name()
            .to_str()
            .is_some_and(|name| IGNORED_DIRECTORIES.contains(&name))
}

fn walk_error(source: walkdir::Error, fallback: &Path) -> Error {
    let path = source
        .path()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| fallback.to_path_buf());
    Error::Walk { path, source }
}

/// Turns a directory tree into route descriptors
pub struct DirectoryWalker<'a, A: ?Sized> {
    adapter: &'a A,
    transformer: SegmentTransformer,
    extensions: Vec<String>,
    sort_entries: bool,
}

impl<'a, A: FrameworkAdapter + ?Sized> DirectoryWalker<'a, A> {
    pub fn new(adapter: &'a A, config: &RoutesConfig) -> Self {
        Self {
            adapter,
            transformer: SegmentTransformer::for_adapter(adapter),
            extensions: config.extensions.clone(),
            sort_entries: config.sort_entries,
        }
    }

    /// Lazily walks `root`, parent directories before their children
    pub fn walk(&self, root: impl AsRef<Path>) -> Walk<'_, A> {
        let root = root.as_ref().to_path_buf();
        let mut walkdir = WalkDir::new(&root);
        if self.sort_entries {
            walkdir = walkdir.sort_by_file_name();
        }

        Walk {
            walker: self,
            directories: walkdir
                .into_iter()
                .filter_entry(is_visited as fn(&DirEntry) -> bool),
            root,
            pending: VecDeque::new(),
            diagnostics: Vec::new(),
        }
    }

    fn visit_directory(
        &self,
        root: &Path,
        directory: &Path,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<Vec<RouteDescriptor>> {
        let relative = directory
            .strip_prefix(root)
            .unwrap_or(directory)
            .components()
            .filter_map(|component| match component {
                Component::Normal(part) => Some(part.to_string_lossy()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("/");

        let directory_route =
            self.transformer
                .transform_directory(self.adapter, &relative, diagnostics);
        let filenames = self.list_files(directory)?;

        Ok(self.visit_one_directory(directory, &directory_route, filenames, diagnostics))
    }

    fn list_files(&self, directory: &Path) -> Result<Vec<OsString>> {
        let mut walkdir = WalkDir::new(directory)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true);
        if self.sort_entries {
            walkdir = walkdir.sort_by_file_name();
        }

        walkdir
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) if entry.file_type().is_file() => Some(Ok(entry.file_name().to_owned())),
                Ok(_) => None,
                Err(source) => Some(Err(walk_error(source, directory))),
            })
            .collect()
    }

    /// Builds the routes for the files directly inside one directory
    ///
    /// Literal routes come first, wildcard routes after, each group in the
    /// order `filenames` lists them. Names that are not valid UTF-8 still
    /// route under their lossy form, and their source path keeps the real name.
    pub fn visit_one_directory<I, S>(
        &self,
        directory: &Path,
        directory_route: &Expanded,
        filenames: I,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Vec<RouteDescriptor>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mut normal_routes = Vec::new();
        let mut wildcard_routes = Vec::new();

        for entry_name in filenames {
            let entry_name = entry_name.as_ref();
            let filename = entry_name.to_string_lossy();
            let Some((stem, extension)) = filename.rsplit_once('.') else {
                continue;
            };
            if stem.is_empty() || !self.extensions.iter().any(|ext| ext == extension) {
                continue;
            }

            if entry_name.to_str().is_none() {
                diagnostics.push(
                    Diagnostic::new(
                        DiagnosticCode::InvalidCharacters,
                        format!("{} is not valid UTF-8", filename),
                    )
                    .with_hint("Undecodable bytes are replaced with U+FFFD in the route name."),
                );
            }

            let bad_chars = invalid_characters(stem);
            if !bad_chars.is_empty() {
                diagnostics.push(
                    Diagnostic::new(
                        DiagnosticCode::InvalidCharacters,
                        format!(
                            "{} contains invalid characters: {}",
                            filename,
                            bad_chars.iter().collect::<String>()
                        ),
                    )
                    .with_hint("Some characters are not allowed on all supported platforms."),
                );
            }

            if SKIPPED_STEMS.contains(&stem) {
                continue;
            }

            let (name, is_wildcard, is_index) = if stem == INDEX_STEM {
                let mut name = directory_route.text.clone();
                if !name.is_empty() {
                    name.push('/');
                }
                (name, directory_route.is_wildcard, true)
            } else {
                let segment = self.transformer.transform(self.adapter, stem, diagnostics);
                let name = if directory_route.text.is_empty() {
                    segment.text
                } else {
                    format!("{}/{}", directory_route.text, segment.text)
                };
                (name, directory_route.is_wildcard || segment.is_wildcard, false)
            };

            let route = RouteDescriptor {
                name,
                source_path: directory.join(entry_name),
                is_wildcard,
                stem: stem.to_string(),
                is_index,
            };
            tracing::trace!(route = %route.name, path = %route.source_path.display(), "discovered route");

            if is_wildcard {
                wildcard_routes.push(route);
            } else {
                normal_routes.push(route);
            }
        }

        normal_routes.extend(wildcard_routes);
        normal_routes
    }
}

/// One-pass iterator over the routes of a directory tree
///
/// Diagnostics found while walking accumulate inside the iterator; drain them
/// with [`Walk::take_diagnostics`].
pub struct Walk<'w, A: ?Sized> {
    walker: &'w DirectoryWalker<'w, A>,
    directories: FilterEntry<walkdir::IntoIter, fn(&DirEntry) -> bool>,
    root: PathBuf,
    pending: VecDeque<RouteDescriptor>,
    diagnostics: Vec<Diagnostic>,
}

impl<A: ?Sized> Walk<'_, A> {
    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }
}

impl<A: FrameworkAdapter + ?Sized> Iterator for Walk<'_, A> {
    type Item = Result<RouteDescriptor>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(route) = self.pending.pop_front() {
                return Some(Ok(route));
            }

            let entry = match self.directories.next()? {
                Ok(entry) => entry,
                Err(source) => return Some(Err(walk_error(source, &self.root))),
            };
            if !entry.file_type().is_dir() {
                continue;
            }

            match self
                .walker
                .visit_directory(&self.root, entry.path(), &mut self.diagnostics)
            {
                Ok(routes) => self.pending.extend(routes),
                Err(err) => return Some(Err(err)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::AngleAdapter;

    fn visit(directory_route: &str, filenames: &[&str]) -> (Vec<RouteDescriptor>, Vec<Diagnostic>) {
        let adapter = AngleAdapter;
        let walker = DirectoryWalker::new(&adapter, &RoutesConfig::default());
        let mut diagnostics = Vec::new();
        let transformer = SegmentTransformer::for_adapter(&adapter);
        let directory_route = transformer.transform_directory(&adapter, directory_route, &mut diagnostics);
        let routes = walker.visit_one_directory(
            Path::new("routes"),
            &directory_route,
            filenames.iter().copied(),
            &mut diagnostics,
        );
        (routes, diagnostics)
    }

    fn names(routes: &[RouteDescriptor]) -> Vec<&str> {
        routes.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn test_invalid_characters() {
        assert_eq!(invalid_characters("home"), Vec::<char>::new());
        assert_eq!(invalid_characters("a:b?c:d"), vec![':', '?']);
    }

    #[test]
    fn test_root_index_is_empty_route() {
        let (routes, _) = visit("", &["index.rs"]);
        assert_eq!(names(&routes), vec![""]);
        assert!(routes[0].is_index);
    }

    #[test]
    fn test_nested_index_has_trailing_slash() {
        let (routes, _) = visit("docs", &["index.rs", "docs.rs"]);
        assert_eq!(names(&routes), vec!["docs/", "docs/docs"]);
    }

    #[test]
    fn test_module_markers_are_skipped() {
        let (routes, _) = visit("", &["mod.rs", "__init__.rs", "home.rs"]);
        assert_eq!(names(&routes), vec!["home"]);
    }

    #[test]
    fn test_unknown_extensions_are_skipped() {
        let (routes, _) = visit("", &["home.rs", "notes.md", "README", ".rs"]);
        assert_eq!(names(&routes), vec!["home"]);
    }

    #[test]
    fn test_literals_before_wildcards() {
        let (routes, _) = visit("", &["[str].rs", "normal.rs", "[int_id].rs", "other.rs"]);
        assert_eq!(
            names(&routes),
            vec!["normal", "other", "<str:str>", "<int:id>"]
        );
        assert!(!routes[1].is_wildcard);
        assert!(routes[2].is_wildcard);
    }

    #[test]
    fn test_wildcard_directory_marks_every_route() {
        let (routes, _) = visit("[username]", &["settings.rs", "index.rs"]);
        assert_eq!(
            names(&routes),
            vec!["<str:username>/settings", "<str:username>/"]
        );
        assert!(routes.iter().all(|r| r.is_wildcard));
    }

    #[test]
    fn test_invalid_characters_still_route() {
        let (routes, diagnostics) = visit("", &["a:b.rs"]);
        assert_eq!(names(&routes), vec!["a:b"]);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code, DiagnosticCode::InvalidCharacters);
        assert_eq!(diagnostics[0].message, "a:b.rs contains invalid characters: :");
    }

    #[test]
    fn test_only_last_extension_is_stripped() {
        let (routes, _) = visit("", &["robots.txt.rs"]);
        assert_eq!(names(&routes), vec!["robots.txt"]);
        assert_eq!(routes[0].stem, "robots.txt");
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_name_keeps_real_path() {
        use std::os::unix::ffi::OsStrExt;

        let name = OsStr::from_bytes(b"caf\xe9.rs");
        let adapter = AngleAdapter;
        let walker = DirectoryWalker::new(&adapter, &RoutesConfig::default());
        let mut diagnostics = Vec::new();
        let routes = walker.visit_one_directory(
            Path::new("routes"),
            &Expanded::default(),
            [name],
            &mut diagnostics,
        );

        assert_eq!(names(&routes), vec!["caf\u{FFFD}"]);
        assert_eq!(routes[0].source_path, Path::new("routes").join(name));
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code, DiagnosticCode::InvalidCharacters);
    }
}
