//! Loading route files into attribute snapshots.
//!
//! Route modules are never executed. [`SourceLoader`] parses each file with
//! `syn` and records its public items, which makes the attribute set of every
//! module statically enumerable.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use syn::punctuated::Punctuated;
use syn::{Item, Meta, MetaNameValue, Token, UseTree, Visibility};

use super::attribute::{Annotations, Attribute, Class, ClassKind, Constant, Function, Reexport, Value};
use crate::error::{Error, Result};

/// Name of the annotation carrying per-view route metadata
pub const ROUTE_ANNOTATION: &str = "route";

/// Produces the public attributes of a route file
pub trait ModuleLoader {
    fn load(&self, path: &Path) -> Result<Vec<Attribute>>;
}

/// Loads `.rs` route files by parsing them with `syn`
#[derive(Debug, Default, Clone, Copy)]
pub struct SourceLoader;

impl ModuleLoader for SourceLoader {
    fn load(&self, path: &Path) -> Result<Vec<Attribute>> {
        let content = fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let file = syn::parse_file(&content).map_err(|source| Error::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::trace!(path = %path.display(), items = file.items.len(), "parsed route file");

        Ok(exports(&file))
    }
}

/// Collects the public items of a parsed file
///
/// Names starting with `_` are private by convention and skipped.
pub fn exports(file: &syn::File) -> Vec<Attribute> {
    let bases = implemented_traits(&file.items);
    let mut attributes = Vec::new();

    for item in &file.items {
        match item {
            Item::Fn(f) if is_public(&f.vis) => attributes.push(Attribute::Function(Function {
                name: f.sig.ident.to_string(),
                is_async: f.sig.asyncness.is_some(),
                annotations: route_annotations(&f.attrs),
            })),
            Item::Struct(s) if is_public(&s.vis) => {
                attributes.push(class(&s.ident, ClassKind::Struct, &s.attrs, &bases))
            }
            Item::Enum(e) if is_public(&e.vis) => {
                attributes.push(class(&e.ident, ClassKind::Enum, &e.attrs, &bases))
            }
            Item::Const(c) if is_public(&c.vis) => attributes.push(Attribute::Constant(Constant {
                name: c.ident.to_string(),
                is_static: false,
                ty: tokens(&c.ty),
                value: Value::from_expr(&c.expr),
            })),
            Item::Static(s) if is_public(&s.vis) => attributes.push(Attribute::Constant(Constant {
                name: s.ident.to_string(),
                is_static: true,
                ty: tokens(&s.ty),
                value: Value::from_expr(&s.expr),
            })),
            Item::Use(u) if is_public(&u.vis) => {
                let mut reexports = Vec::new();
                collect_reexports(&u.tree, &mut Vec::new(), &mut reexports);
                attributes.extend(reexports.into_iter().map(Attribute::Reexport));
            }
            Item::Mod(m) if is_public(&m.vis) => attributes.push(other(&m.ident, "module")),
            Item::Trait(t) if is_public(&t.vis) => attributes.push(other(&t.ident, "trait")),
            Item::Type(t) if is_public(&t.vis) => attributes.push(other(&t.ident, "type alias")),
            Item::Union(u) if is_public(&u.vis) => attributes.push(other(&u.ident, "union")),
            _ => {}
        }
    }

    attributes.retain(|attribute| !attribute.name().starts_with('_'));
    attributes
}

fn is_public(vis: &Visibility) -> bool {
    matches!(vis, Visibility::Public(_))
}

fn tokens(node: &impl quote::ToTokens) -> String {
    node.to_token_stream().to_string()
}

fn other(ident: &syn::Ident, kind: &'static str) -> Attribute {
    Attribute::Other {
        name: ident.to_string(),
        kind,
    }
}

fn class(
    ident: &syn::Ident,
    kind: ClassKind,
    attrs: &[syn::Attribute],
    bases: &HashMap<String, Vec<String>>,
) -> Attribute {
    let name = ident.to_string();
    Attribute::Class(Class {
        bases: bases.get(&name).cloned().unwrap_or_default(),
        name,
        kind,
        annotations: route_annotations(attrs),
    })
}

/// Maps each type name to the traits implemented for it in this file
fn implemented_traits(items: &[Item]) -> HashMap<String, Vec<String>> {
    let mut bases: HashMap<String, Vec<String>> = HashMap::new();

    for item in items {
        let Item::Impl(imp) = item else { continue };
        let Some((_, trait_path, _)) = &imp.trait_ else {
            continue;
        };
        let syn::Type::Path(self_ty) = &*imp.self_ty else {
            continue;
        };
        let (Some(ty), Some(base)) = (self_ty.path.segments.last(), trait_path.segments.last())
        else {
            continue;
        };

        bases
            .entry(ty.ident.to_string())
            .or_default()
            .push(base.ident.to_string());
    }

    bases
}

fn collect_reexports(tree: &UseTree, prefix: &mut Vec<String>, out: &mut Vec<Reexport>) {
    match tree {
        UseTree::Path(path) => {
            prefix.push(path.ident.to_string());
            collect_reexports(&path.tree, prefix, out);
            prefix.pop();
        }
        UseTree::Name(name) if name.ident == "self" => {
            if let Some(last) = prefix.last() {
                out.push(Reexport {
                    name: last.clone(),
                    target: prefix.join("::"),
                });
            }
        }
        UseTree::Name(name) => {
            let ident = name.ident.to_string();
            out.push(Reexport {
                target: join_path(prefix, &ident),
                name: ident,
            });
        }
        UseTree::Rename(rename) => out.push(Reexport {
            name: rename.rename.to_string(),
            target: join_path(prefix, &rename.ident.to_string()),
        }),
        UseTree::Group(group) => {
            for item in &group.items {
                collect_reexports(item, prefix, out);
            }
        }
        UseTree::Glob(_) => {}
    }
}

fn join_path(prefix: &[String], ident: &str) -> String {
    if prefix.is_empty() {
        ident.to_string()
    } else {
        format!("{}::{}", prefix.join("::"), ident)
    }
}

/// Reads `#[route(key = value, ...)]` annotations
///
/// A bare `#[route]` carries no pairs. Any other shape, and any pair whose key
/// is not a plain identifier, is kept as token text in `malformed`.
fn route_annotations(attrs: &[syn::Attribute]) -> Annotations {
    let mut annotations = Annotations::new();

    for attr in attrs.iter().filter(|a| a.path().is_ident(ROUTE_ANNOTATION)) {
        match &attr.meta {
            Meta::Path(_) => {}
            Meta::List(_) => {
                let parsed =
                    attr.parse_args_with(Punctuated::<MetaNameValue, Token![,]>::parse_terminated);
                let Ok(pairs) = parsed else {
                    annotations.malformed.push(tokens(attr));
                    continue;
                };
                for pair in pairs {
                    match pair.path.get_ident() {
                        Some(key) => {
                            annotations.insert(key.to_string(), Value::from_expr(&pair.value))
                        }
                        None => annotations.malformed.push(tokens(&pair)),
                    }
                }
            }
            Meta::NameValue(_) => annotations.malformed.push(tokens(attr)),
        }
    }

    annotations
}
