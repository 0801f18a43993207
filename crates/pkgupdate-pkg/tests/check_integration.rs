use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use pkgupdate_exec::{CommandResult, CommandRunner, ExecError};
use pkgupdate_pkg::detect::{detect, resolve};
use pkgupdate_pkg::registry::NO_MATCHING_PACKAGES;
use pkgupdate_pkg::*;

const PKG_INSTALLED: &str = "foo-package|6.1.5|1|x86_64\n";
const PKG_AVAILABLE: &str = "Available Packages\nfoo-package.x86_64        8.0.0-1         foo-stable\n";

/// Replays canned outputs in order and records every argv it was given
#[derive(Default)]
struct ScriptedRunner {
    responses: Mutex<VecDeque<Result<CommandResult, ExecError>>>,
    calls: Mutex<Vec<Vec<String>>>,
    timeouts: Mutex<Vec<Duration>>,
}

impl ScriptedRunner {
    fn new(responses: Vec<Result<CommandResult, ExecError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            ..Self::default()
        }
    }

    fn outputs(outputs: &[(&str, &str)]) -> Self {
        Self::new(
            outputs
                .iter()
                .map(|(stdout, stderr)| Ok(CommandResult::new(*stdout, *stderr)))
                .collect(),
        )
    }

    fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CommandRunner for ScriptedRunner {
    async fn run(&self, argv: &[&str]) -> Result<CommandResult, ExecError> {
        self.calls
            .lock()
            .unwrap()
            .push(argv.iter().map(ToString::to_string).collect());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected command")
    }

    async fn run_with_timeout(
        &self,
        argv: &[&str],
        timeout: Duration,
    ) -> Result<CommandResult, ExecError> {
        self.timeouts.lock().unwrap().push(timeout);
        self.run(argv).await
    }

    fn runner_type(&self) -> &'static str {
        "scripted"
    }
}

fn yum() -> CheckOptions {
    CheckOptions::default().with_pkg_mgr("yum")
}

#[tokio::test]
async fn test_empty_package_list_fails() {
    let runner = ScriptedRunner::default();
    let packages: [&str; 0] = [];

    let options = CheckOptions::default().with_pkg_mgr("dnf");

    let result = check_update(&runner, &packages, &options).await;

    assert_eq!(result, Err(PackageError::NoPackagesGiven));
    assert!(runner.calls().is_empty());
}

#[tokio::test]
async fn test_unsupported_manager_fails() {
    let runner = ScriptedRunner::default();

    let result = check_update(
        &runner,
        &["foo-package"],
        &CheckOptions::default().with_pkg_mgr("apt"),
    )
    .await;

    assert_eq!(
        result,
        Err(PackageError::UnsupportedManager("apt".to_string()))
    );
    assert!(runner.calls().is_empty());
}

#[tokio::test]
async fn test_installed_query_stderr_fails() {
    let runner = ScriptedRunner::outputs(&[("", "No package found.")]);

    let result = check_update(&runner, &["foo-package"], &yum()).await;

    assert_eq!(
        result,
        Err(PackageError::QueryError("No package found.".to_string()))
    );
    assert_eq!(runner.calls().len(), 1);
}

#[tokio::test]
async fn test_installed_query_empty_output_fails() {
    let runner = ScriptedRunner::outputs(&[("", "")]);

    let result = check_update(&runner, &["foo-package"], &yum()).await;

    assert!(matches!(
        result,
        Err(PackageError::EmptyQueryResult { ref command }) if command.starts_with("rpm -qa --qf")
    ));
}

#[tokio::test]
async fn test_missing_package_fails_before_available_query() {
    let runner = ScriptedRunner::outputs(&[(PKG_INSTALLED, "")]);

    let result = check_update(&runner, &["foo-package", "bar-package"], &yum()).await;

    assert_eq!(
        result,
        Err(PackageError::MissingPackages(vec!["bar-package".to_string()]))
    );
    assert_eq!(runner.calls().len(), 1);
}

#[tokio::test]
async fn test_returns_current_and_available_versions() {
    let runner = ScriptedRunner::outputs(&[(PKG_INSTALLED, ""), (PKG_AVAILABLE, "")]);

    let report = check_update(&runner, &["foo-package"], &yum()).await.unwrap();

    assert!(!report.changed);
    assert_eq!(
        report.outdated_pkgs,
        vec![UpdateResult {
            name: "foo-package.x86_64".to_string(),
            current_version: "6.1.5".to_string(),
            current_release: "1".to_string(),
            new_version: Some("8.0.0".to_string()),
            new_release: Some("1".to_string()),
        }]
    );

    let calls = runner.calls();
    assert_eq!(
        calls[0],
        vec!["rpm", "-qa", "--qf", "%{NAME}|%{VERSION}|%{RELEASE}|%{ARCH}\n"]
    );
    assert_eq!(
        calls[1],
        vec!["yum", "-q", "list", "available", "foo-package.x86_64"]
    );
}

#[tokio::test]
async fn test_returns_current_version_if_no_updates() {
    let runner = ScriptedRunner::outputs(&[(PKG_INSTALLED, ""), ("", NO_MATCHING_PACKAGES)]);

    let report = check_update(&runner, &["foo-package"], &yum()).await.unwrap();

    assert_eq!(report.outdated_pkgs.len(), 1);
    let result = &report.outdated_pkgs[0];
    assert_eq!(result.current_version, "6.1.5");
    assert_eq!(result.new_version, None);
    assert_eq!(result.new_release, None);
}

#[tokio::test]
async fn test_available_query_unexpected_stderr_fails() {
    let stderr = "Error: Failed to download metadata for repo 'updates'\n";
    let runner = ScriptedRunner::outputs(&[(PKG_INSTALLED, ""), ("", stderr)]);

    let result = check_update(&runner, &["foo-package"], &yum()).await;

    assert_eq!(result, Err(PackageError::QueryError(stderr.to_string())));
}

#[tokio::test]
async fn test_available_query_lists_every_installed_key() {
    let installed = "bash|5.2.26|3.fc40|x86_64\ncurl|8.6.0|7.fc40|x86_64\nglibc|2.39|4.fc40|i686\n";
    let available = "Available Packages\ncurl.x86_64  8.6.0-8.fc40  updates\n";
    let runner = ScriptedRunner::outputs(&[(installed, ""), (available, "")]);

    let report = check_update(
        &runner,
        &["curl", "glibc", "bash"],
        &CheckOptions::default().with_pkg_mgr("dnf"),
    )
    .await
    .unwrap();

    assert_eq!(
        runner.calls()[1],
        vec![
            "dnf",
            "-q",
            "list",
            "--available",
            "bash.x86_64 curl.x86_64 glibc.i686"
        ]
    );
    let names: Vec<&str> = report.outdated_pkgs.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["bash.x86_64", "curl.x86_64", "glibc.i686"]);
    assert_eq!(report.updates().count(), 1);
}

#[tokio::test]
async fn test_detection_runs_before_queries() {
    let runner = ScriptedRunner::outputs(&[
        ("/usr/bin/dnf\n", ""),
        (PKG_INSTALLED, ""),
        (PKG_AVAILABLE, ""),
    ]);

    let report = check_update(&runner, &["foo-package"], &CheckOptions::default())
        .await
        .unwrap();

    let calls = runner.calls();
    assert_eq!(calls[0], vec!["sh", "-c", "command -v dnf"]);
    assert_eq!(calls[2][0], "dnf");
    assert!(report.outdated_pkgs[0].has_update());
}

#[tokio::test]
async fn test_timeout_is_applied_to_every_command() {
    let runner = ScriptedRunner::outputs(&[(PKG_INSTALLED, ""), (PKG_AVAILABLE, "")]);
    let options = yum().with_timeout(Duration::from_secs(30));

    check_update(&runner, &["foo-package"], &options).await.unwrap();

    assert_eq!(
        *runner.timeouts.lock().unwrap(),
        vec![Duration::from_secs(30), Duration::from_secs(30)]
    );
}

#[tokio::test]
async fn test_runner_timeout_is_terminal() {
    let timeout = Duration::from_secs(1);
    let runner = ScriptedRunner::new(vec![Err(ExecError::Timeout { timeout })]);

    let result = check_update(&runner, &["foo-package"], &yum().with_timeout(timeout)).await;

    assert_eq!(
        result,
        Err(PackageError::Exec(ExecError::Timeout { timeout }))
    );
}

#[tokio::test]
async fn test_detect_first_present_manager_wins() {
    let runner = ScriptedRunner::outputs(&[("/usr/bin/dnf\n", "")]);

    let spec = detect(&runner, None).await.unwrap();

    assert_eq!(spec.id, "dnf");
    assert_eq!(runner.calls().len(), 1);
}

#[tokio::test]
async fn test_detect_falls_back_to_yum() {
    let runner = ScriptedRunner::outputs(&[("barSTDOUT", "fooERROR"), ("fizzSTDOUT", "")]);

    let spec = detect(&runner, None).await.unwrap();

    assert_eq!(spec.id, "yum");
    assert_eq!(runner.calls()[1], vec!["sh", "-c", "command -v yum"]);
}

#[tokio::test]
async fn test_detect_skips_unspawnable_probe() {
    let runner = ScriptedRunner::new(vec![
        Err(ExecError::SpawnError("sh: not found".to_string())),
        Ok(CommandResult::new("/usr/bin/yum\n", "")),
    ]);

    let spec = detect(&runner, None).await.unwrap();

    assert_eq!(spec.id, "yum");
}

#[tokio::test]
async fn test_detect_none_found() {
    let runner = ScriptedRunner::outputs(&[("barSTDOUT", "fooERROR"), ("", "")]);

    let result = detect(&runner, None).await;

    assert_eq!(
        result,
        Err(PackageError::NoPackageManagerFound {
            tried: vec!["dnf".to_string(), "yum".to_string()],
        })
    );
}

#[tokio::test]
async fn test_resolve_explicit_manager_skips_probe() {
    let runner = ScriptedRunner::default();

    let spec = resolve(&runner, Some("yum"), None).await.unwrap();

    assert_eq!(spec.id, "yum");
    assert!(runner.calls().is_empty());
}
