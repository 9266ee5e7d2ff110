//! Integration tests for the stratum-core domain pipeline:
//! identifier → canonical names → paths → registry lines.

use std::path::Path;

use stratum_core::domain::{
    EntityIdentifier, Granularity, LinePatch, NamingScheme, PathSet, RegistryEntry,
    insert_after_marker,
};

fn resolve(input: &str) -> PathSet {
    let id = EntityIdentifier::parse(input).unwrap();
    PathSet::resolve("/env/dev", &NamingScheme::default(), &id).unwrap()
}

#[test]
fn prefixed_and_bare_tokens_resolve_identically() {
    assert_eq!(
        resolve("blog.posts.comments"),
        resolve("project_blog.app_posts.mod_comments")
    );
}

#[test]
fn module_identifier_resolves_every_level() {
    let paths = resolve("blog.posts.comments");
    assert_eq!(paths.granularity(), Granularity::Module);

    assert_eq!(paths.project.root, Path::new("/env/dev/blog"));
    assert_eq!(
        paths.project.settings,
        Path::new("/env/dev/blog/project_blog/settings.py")
    );

    let app = paths.app.as_ref().unwrap();
    assert_eq!(app.dir, Path::new("/env/dev/blog/app_posts"));
    assert_eq!(app.default_module.name.as_str(), "mod_app");
    assert_eq!(app.own_module.name.as_str(), "mod_posts");

    let module = paths.module.as_ref().unwrap();
    assert_eq!(
        module.urls,
        Path::new("/env/dev/blog/app_posts/mod_comments/urls_comments.py")
    );
    assert_eq!(
        module.templates,
        Path::new("/env/dev/blog/app_posts/templates/app_posts/mod_comments")
    );
}

#[test]
fn project_identifier_has_no_app_paths() {
    let paths = resolve("blog");
    assert_eq!(paths.granularity(), Granularity::Project);
    assert!(paths.app.is_none());
    assert!(paths.module.is_none());
}

#[test]
fn invalid_identifiers_are_rejected() {
    for bad in ["", "a..b", "a.b.c.d", "my-blog", "blog.posts.", "blog/x"] {
        assert!(EntityIdentifier::parse(bad).is_err(), "accepted {bad:?}");
    }
}

#[test]
fn registry_entries_apply_once_to_generated_files() {
    let paths = resolve("blog.posts");
    let app = paths.app.unwrap();

    let settings = "INSTALLED_APPS = [\n    'django.contrib.admin',\n]\n";
    let entry = RegistryEntry::installed_app(&app.name);

    let LinePatch::Inserted(patched) = insert_after_marker(settings, &entry.marker, &entry.line)
    else {
        panic!("expected insertion");
    };
    assert_eq!(
        patched,
        "INSTALLED_APPS = [\n    'app_posts',\n    'django.contrib.admin',\n]\n"
    );
    assert_eq!(
        insert_after_marker(&patched, &entry.marker, &entry.line),
        LinePatch::AlreadyPresent
    );
}
