//! End-to-end orchestration over real adapters.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use stratum_adapters::{BuiltinGenerator, LocalFilesystem, MemoryFilesystem};
use stratum_core::{
    application::{
        HierarchyOrchestrator, InvokerOptions, StepStatus, StepSubject, TextRegistryPatcher,
        ports::{Filesystem, ScaffoldGenerator},
    },
    domain::{EntityIdentifier, NamingScheme},
    error::StratumResult,
};

fn id(input: &str) -> EntityIdentifier {
    EntityIdentifier::parse(input).unwrap()
}

fn memory_orchestrator(fs: &MemoryFilesystem) -> HierarchyOrchestrator {
    let shared: Arc<dyn Filesystem> = Arc::new(fs.clone());
    HierarchyOrchestrator::new(
        "/env/dev",
        NamingScheme::default(),
        shared.clone(),
        Box::new(BuiltinGenerator::new(shared.clone())),
        Box::new(TextRegistryPatcher::new(shared)),
        InvokerOptions::default(),
    )
}

fn occurrences(haystack: &str, line: &str) -> usize {
    haystack.lines().filter(|l| l.trim() == line.trim()).count()
}

#[test]
fn full_hierarchy_layout() {
    let fs = MemoryFilesystem::new();
    memory_orchestrator(&fs)
        .create(&id("blog.posts.comments"))
        .unwrap();

    let root = Path::new("/env/dev/blog");
    for file in [
        "manage.py",
        "project_blog/settings.py",
        "project_blog/urls.py",
        "app_posts/apps.py",
        "app_posts/urls.py",
        "app_posts/admin.py",
        "app_posts/mod_app/__init__.py",
        "app_posts/mod_posts/__init__.py",
        "app_posts/mod_comments/__init__.py",
        "app_posts/mod_comments/urls_comments.py",
        "app_posts/mod_comments/models_comments.py",
        "app_posts/mod_comments/views_comments.py",
        "app_posts/mod_comments/forms_comments.py",
    ] {
        assert!(fs.exists(&root.join(file)), "missing {file}");
    }
    assert!(fs.exists(&root.join("app_posts/templates/app_posts/mod_comments")));

    // Stripped boilerplate
    assert!(!fs.exists(&root.join("app_posts/models.py")));
    assert!(!fs.exists(&root.join("app_posts/views.py")));
    assert!(!fs.exists(&root.join("app_posts/tests.py")));

    let app_urls = fs.content(&root.join("app_posts/urls.py")).unwrap();
    assert_eq!(
        occurrences(
            &app_urls,
            "path('comments/', include('app_posts.mod_comments.urls_comments')),"
        ),
        1
    );
}

#[test]
fn rerun_is_a_noop() {
    let fs = MemoryFilesystem::new();
    let orchestrator = memory_orchestrator(&fs);

    orchestrator.create(&id("blog.posts.comments")).unwrap();
    let files = fs.list_files();
    let mutations = fs.mutations();

    let report = orchestrator.create(&id("blog.posts.comments")).unwrap();

    assert!(report.is_noop());
    assert_eq!(fs.mutations(), mutations);
    assert_eq!(fs.list_files(), files);
}

#[test]
fn registry_lines_appear_once_across_runs() {
    let fs = MemoryFilesystem::new();
    let orchestrator = memory_orchestrator(&fs);

    for input in ["blog.posts", "blog.posts.comments", "blog.posts", "blog.posts.tags"] {
        orchestrator.create(&id(input)).unwrap();
    }

    let settings = fs
        .content(Path::new("/env/dev/blog/project_blog/settings.py"))
        .unwrap();
    let urls = fs
        .content(Path::new("/env/dev/blog/project_blog/urls.py"))
        .unwrap();
    assert_eq!(occurrences(&settings, "'app_posts',"), 1);
    assert_eq!(occurrences(&urls, "from django.urls import include"), 1);
    assert_eq!(
        occurrences(&urls, "path('posts/', include('app_posts.urls')),"),
        1
    );

    let app_urls = fs
        .content(Path::new("/env/dev/blog/app_posts/urls.py"))
        .unwrap();
    assert_eq!(
        occurrences(&app_urls, "path('tags/', include('app_posts.mod_tags.urls_tags')),"),
        1
    );
}

#[test]
fn second_app_joins_existing_project() {
    let fs = MemoryFilesystem::new();
    let orchestrator = memory_orchestrator(&fs);
    orchestrator.create(&id("blog.posts")).unwrap();

    let report = orchestrator.create(&id("blog.authors")).unwrap();

    let project = &report.steps[0];
    assert_eq!(project.subject, StepSubject::Project);
    assert_eq!(project.status, StepStatus::AlreadyExists);

    let settings = fs
        .content(Path::new("/env/dev/blog/project_blog/settings.py"))
        .unwrap();
    assert!(settings.contains("INSTALLED_APPS = [\n    'app_authors',\n    'app_posts',\n"));
}

#[test]
fn prefixed_and_plain_tokens_are_the_same_entities() {
    let fs = MemoryFilesystem::new();
    let orchestrator = memory_orchestrator(&fs);
    orchestrator.create(&id("blog.posts")).unwrap();

    let report = orchestrator
        .create(&id("project_blog.app_posts"))
        .unwrap();

    assert!(report.is_noop());
}

#[test]
fn module_inside_missing_hierarchy_builds_ancestors_first() {
    #[derive(Clone, Default)]
    struct Recording {
        calls: Arc<Mutex<Vec<(String, PathBuf)>>>,
        fs: MemoryFilesystem,
    }

    impl ScaffoldGenerator for Recording {
        fn name(&self) -> &'static str {
            "recording"
        }

        fn start_project(&self, name: &str, target: &Path) -> StratumResult<()> {
            self.calls
                .lock()
                .unwrap()
                .push((format!("project:{name}"), target.to_path_buf()));
            let package = target.join(name);
            self.fs.create_dir_all(&package)?;
            self.fs
                .write_file(&package.join("settings.py"), "INSTALLED_APPS = [\n]\n")?;
            self.fs.write_file(
                &package.join("urls.py"),
                "from django.urls import path\nurlpatterns = [\n]\n",
            )?;
            self.fs.write_file(&target.join("manage.py"), "")
        }

        fn start_app(&self, name: &str, target: &Path) -> StratumResult<()> {
            assert!(
                self.fs.exists(Path::new("/env/dev/shop/manage.py")),
                "app generated before its project"
            );
            self.calls
                .lock()
                .unwrap()
                .push((format!("app:{name}"), target.to_path_buf()));
            self.fs.write_file(&target.join("apps.py"), "")
        }
    }

    let fs = MemoryFilesystem::new();
    let recording = Recording {
        fs: fs.clone(),
        ..Recording::default()
    };
    let shared: Arc<dyn Filesystem> = Arc::new(fs.clone());
    let orchestrator = HierarchyOrchestrator::new(
        "/env/dev",
        NamingScheme::default(),
        shared.clone(),
        Box::new(recording.clone()),
        Box::new(TextRegistryPatcher::new(shared)),
        InvokerOptions::default(),
    );

    orchestrator.create(&id("shop.cart.items")).unwrap();

    let calls = recording.calls.lock().unwrap().clone();
    assert_eq!(
        calls,
        vec![
            (
                "project:project_shop".to_string(),
                PathBuf::from("/env/dev/shop")
            ),
            (
                "app:app_cart".to_string(),
                PathBuf::from("/env/dev/shop/app_cart")
            ),
        ]
    );
}

#[test]
fn interrupted_module_is_completed_on_next_run() {
    let fs = MemoryFilesystem::new();
    let orchestrator = memory_orchestrator(&fs);
    orchestrator.create(&id("blog.posts")).unwrap();

    // Simulate a run that stopped after the directory and one placeholder.
    let module = Path::new("/env/dev/blog/app_posts/mod_comments");
    fs.create_dir_all(module).unwrap();
    fs.write_file(&module.join("urls_comments.py"), "# edited\n")
        .unwrap();

    orchestrator.create(&id("blog.posts.comments")).unwrap();

    assert!(fs.exists(&module.join("__init__.py")));
    assert!(fs.exists(&module.join("forms_comments.py")));
    assert_eq!(
        fs.content(&module.join("urls_comments.py")).as_deref(),
        Some("# edited\n")
    );
}

#[test]
fn delete_then_recreate() {
    let fs = MemoryFilesystem::new();
    let orchestrator = memory_orchestrator(&fs);
    orchestrator.create(&id("blog.posts")).unwrap();

    let report = orchestrator.delete(&id("blog")).unwrap();
    assert_eq!(report.count(StepStatus::Deleted), 1);
    assert!(!fs.exists(Path::new("/env/dev/blog")));

    let report = orchestrator.create(&id("blog")).unwrap();
    assert_eq!(report.count(StepStatus::Created), 1);
}

#[test]
fn local_filesystem_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("env").join("dev");
    let shared: Arc<dyn Filesystem> = Arc::new(LocalFilesystem::new());
    let orchestrator = HierarchyOrchestrator::new(
        &base,
        NamingScheme::default(),
        shared.clone(),
        Box::new(BuiltinGenerator::new(shared.clone())),
        Box::new(TextRegistryPatcher::new(shared)),
        InvokerOptions::default(),
    );

    orchestrator.create(&id("blog.posts.comments")).unwrap();
    let second = orchestrator.create(&id("blog.posts.comments")).unwrap();

    assert!(second.is_noop());
    assert!(base.join("blog/manage.py").is_file());
    assert!(
        base.join("blog/app_posts/mod_comments/urls_comments.py")
            .is_file()
    );
    let settings =
        std::fs::read_to_string(base.join("blog/project_blog/settings.py")).unwrap();
    assert_eq!(occurrences(&settings, "'app_posts',"), 1);
}
