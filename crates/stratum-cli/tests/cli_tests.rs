//! End-to-end tests for the `stratum` binary using the builtin generator.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// A `stratum` command isolated from the user's config and environment.
fn stratum(workdir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("stratum").unwrap();
    cmd.current_dir(workdir)
        .env("HOME", workdir)
        .env("XDG_CONFIG_HOME", workdir.join(".config"))
        .env("STRATUM_GENERATOR__KIND", "builtin")
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

fn count_lines(path: &Path, line: &str) -> usize {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .filter(|l| l.trim() == line)
        .count()
}

#[test]
fn help_lists_commands() {
    let temp = TempDir::new().unwrap();
    stratum(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("create"))
        .stdout(predicate::str::contains("delete"));
}

#[test]
fn version_flag() {
    let temp = TempDir::new().unwrap();
    stratum(temp.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn create_module_builds_whole_hierarchy() {
    let temp = TempDir::new().unwrap();
    stratum(temp.path())
        .args(["create", "blog.posts.comments", "--output-dir", "out"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created project 'project_blog'"))
        .stdout(predicate::str::contains("Created app 'app_posts'"))
        .stdout(predicate::str::contains("Created module 'mod_comments'"));

    let root = temp.path().join("out/blog");
    for file in [
        "manage.py",
        "project_blog/settings.py",
        "project_blog/urls.py",
        "app_posts/apps.py",
        "app_posts/urls.py",
        "app_posts/mod_app/__init__.py",
        "app_posts/mod_posts/__init__.py",
        "app_posts/mod_comments/__init__.py",
        "app_posts/mod_comments/views_comments.py",
    ] {
        assert!(root.join(file).is_file(), "missing {file}");
    }
    assert!(root.join("app_posts/templates/app_posts/mod_comments").is_dir());

    assert_eq!(
        count_lines(&root.join("project_blog/settings.py"), "'app_posts',"),
        1
    );
    assert_eq!(
        count_lines(
            &root.join("project_blog/urls.py"),
            "path('posts/', include('app_posts.urls')),"
        ),
        1
    );
}

#[test]
fn rerun_is_idempotent() {
    let temp = TempDir::new().unwrap();
    let run = || {
        stratum(temp.path())
            .args(["create", "blog.posts.comments", "-o", "out"])
            .assert()
            .success();
    };
    run();
    let settings = temp.path().join("out/blog/project_blog/settings.py");
    let before = fs::read_to_string(&settings).unwrap();

    stratum(temp.path())
        .args(["create", "blog.posts.comments", "-o", "out"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"))
        .stdout(predicate::str::contains("already up to date"))
        .stdout(predicate::str::contains("Created").not());

    assert_eq!(fs::read_to_string(&settings).unwrap(), before);
    run();
    assert_eq!(count_lines(&settings, "'app_posts',"), 1);
}

#[test]
fn dry_run_writes_nothing() {
    let temp = TempDir::new().unwrap();
    stratum(temp.path())
        .args(["create", "blog.posts", "-o", "out", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dry run"))
        .stdout(predicate::str::contains("Would create project 'project_blog'"))
        .stdout(predicate::str::contains("Would register"));

    assert!(!temp.path().join("out").exists());
}

#[test]
fn json_report() {
    let temp = TempDir::new().unwrap();
    let output = stratum(temp.path())
        .args(["create", "blog", "-o", "out", "--output-format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["granularity"], "project");
    assert_eq!(report["steps"][0]["subject"], "project");
    assert_eq!(report["steps"][0]["status"], "created");
}

#[test]
fn base_dir_from_env() {
    let temp = TempDir::new().unwrap();
    stratum(temp.path())
        .env("STRATUM_PATHS__BASE_DIR", "elsewhere")
        .args(["create", "shop"])
        .assert()
        .success();
    assert!(temp.path().join("elsewhere/shop/manage.py").is_file());
}

#[test]
fn delete_then_recreate() {
    let temp = TempDir::new().unwrap();
    stratum(temp.path())
        .args(["create", "blog.posts", "-o", "out"])
        .assert()
        .success();

    stratum(temp.path())
        .args(["delete", "blog", "-o", "out", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted project"));
    assert!(!temp.path().join("out/blog").exists());

    stratum(temp.path())
        .args(["create", "blog", "-o", "out"])
        .assert()
        .success();
    assert!(temp.path().join("out/blog/manage.py").is_file());
}

#[test]
fn init_local_then_config_get() {
    let temp = TempDir::new().unwrap();
    stratum(temp.path())
        .args(["init", "--local"])
        .assert()
        .success();
    let written = fs::read_to_string(temp.path().join("stratum.toml")).unwrap();
    assert!(written.contains("[naming]"));

    // A second init without --force leaves the file alone.
    stratum(temp.path())
        .args(["init", "--local"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));

    stratum(temp.path())
        .args(["config", "get", "naming.module_prefix"])
        .assert()
        .success()
        .stdout(predicate::str::contains("mod_"));
}

#[test]
fn completions_for_bash() {
    let temp = TempDir::new().unwrap();
    stratum(temp.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("stratum"));
}
