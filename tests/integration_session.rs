// slnenv-rs: Solution Environment loader
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for the session controller.
//!
//! Exercises solution discovery, nested definition files, registry tokens
//! and revert cycles against an in-memory environment.

use std::path::Path;

use slnenv_rs::config::types::SolutionConfig;
use slnenv_rs::core::env::container::Env;
use slnenv_rs::core::output::MemorySink;
use slnenv_rs::core::registry::{MemoryRegistry, NoRegistry, RegistryRoot};
use slnenv_rs::host::{SolutionHost, StaticHost};
use slnenv_rs::session::{ReloadOutcome, RunReason, SessionController, Trigger};

const SOLUTION: &str = r#"
Microsoft Visual Studio Solution File, Format Version 12.00
Project("{8BC9CEB8-8B4A-11D0-8D11-00A0C91BC942}") = "App", "App\App.vcxproj", "{AAAAAAAA-0000-0000-0000-000000000001}"
EndProject
Global
	GlobalSection(SolutionConfigurationPlatforms) = preSolution
		Debug|x86 = Debug|x86
		Release|x86 = Release|x86
	EndGlobalSection
	GlobalSection(ProjectConfigurationPlatforms) = postSolution
		{AAAAAAAA-0000-0000-0000-000000000001}.Debug|x86.ActiveCfg = Debug|Win32
		{AAAAAAAA-0000-0000-0000-000000000001}.Release|x86.ActiveCfg = Release|Win32
	EndGlobalSection
EndGlobal
"#;

fn write(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, content).unwrap();
}

fn environment() -> Env {
    let mut env = Env::new();
    env.set("PATH", "/usr/bin");
    env.set("BUILD_MODE", "original");
    env
}

// =============================================================================
// End to end
// =============================================================================

#[test]
fn session_discovered_solution_with_includes() {
    let dir = tempfile::tempdir().unwrap();
    write(&dir.path().join("App.sln"), SOLUTION);
    write(
        &dir.path().join("App.slnenv"),
        "-- App environment\n\
         include env/common.slnenv\n\
         include env/$(SolutionConfiguration).slnenv\n\
         include env/missing.slnenv\n\
         |Win32:ARCH=x86\n\
         |x64:ARCH=x64\n",
    );
    write(
        &dir.path().join("env/common.slnenv"),
        "TOOLS=$(SolutionDir)/tools\nPATH=$(TOOLS):$(PATH)\n",
    );
    write(&dir.path().join("env/Debug.slnenv"), "BUILD_MODE=fast\n");
    write(&dir.path().join("env/Release.slnenv"), "BUILD_MODE=slow\n");

    let host = SolutionHost::discover(&SolutionConfig::default(), dir.path()).unwrap();
    let mut session = SessionController::new(environment(), MemorySink::new(), Box::new(NoRegistry));

    let outcome = session.handle(Trigger::InitialLoad, &host).unwrap();
    assert!(matches!(outcome, ReloadOutcome::Loaded { .. }), "{outcome:?}");

    let tools = format!("{}/tools", dir.path().display());
    assert_eq!(session.env().get("TOOLS"), Some(tools.as_str()));
    assert_eq!(
        session.env().get("PATH"),
        Some(format!("{tools}:/usr/bin").as_str())
    );
    assert_eq!(session.env().get("BUILD_MODE"), Some("fast"));
    assert_eq!(session.env().get("ARCH"), Some("x86"), "platform derived from the .sln");

    let names: Vec<_> = session.log().changes().iter().map(|c| c.name()).collect();
    assert_eq!(names, ["TOOLS", "PATH", "BUILD_MODE", "ARCH"]);

    session.revert();
    assert_eq!(session.env().to_map(), environment().to_map());
}

#[test]
fn session_debug_x64_path_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    write(
        &dir.path().join("App.slnenv"),
        "PATH=$(SolutionDir)\\tools;$(PATH)\n\
         Debug|x64:BUILD_MODE=fast\n\
         Release:BUILD_MODE=slow\n",
    );
    let host = StaticHost::new(dir.path().join("App.sln"), "Debug", "x64");
    let mut session = SessionController::new(environment(), MemorySink::new(), Box::new(NoRegistry));

    session.reload(&host);
    assert_eq!(
        session.env().get("PATH"),
        Some(format!("{}\\tools;/usr/bin", dir.path().display()).as_str())
    );
    assert_eq!(session.env().get("BUILD_MODE"), Some("fast"));

    session.revert();
    assert_eq!(session.env().get("PATH"), Some("/usr/bin"));
    assert_eq!(session.env().get("BUILD_MODE"), Some("original"));
}

#[test]
fn session_seed_shadows_environment() {
    let dir = tempfile::tempdir().unwrap();
    write(&dir.path().join("App.slnenv"), "NAME=$(SolutionName)\nUNKNOWN=[$(NOT_DEFINED)]\n");
    let host = StaticHost::new(dir.path().join("App.sln"), "Debug", "x64");
    let mut env = environment();
    env.set("SolutionName", "from-environment");
    let mut session = SessionController::new(env, MemorySink::new(), Box::new(NoRegistry));

    session.reload(&host);

    assert_eq!(session.env().get("NAME"), Some("App"));
    assert_eq!(session.env().get("UNKNOWN"), Some("[]"));
}

#[test]
fn session_registry_tokens() {
    let dir = tempfile::tempdir().unwrap();
    write(
        &dir.path().join("App.slnenv"),
        "HIVE=HKCU\n\
         SDK=%(HKLM\\SOFTWARE\\Kits\\KitsRoot10)\n\
         USER=%($(HIVE)\\Environment\\Home)\n\
         NOPE=%(HKLM\\SOFTWARE\\Missing\\Value)\n",
    );
    let host = StaticHost::new(dir.path().join("App.sln"), "Debug", "x64");
    let registry = MemoryRegistry::new()
        .with_value(RegistryRoot::LocalMachine, r"SOFTWARE\Kits", "KitsRoot10", r"C:\Kits\10")
        .with_value(RegistryRoot::CurrentUser, "Environment", "Home", r"D:\home");
    let mut session = SessionController::new(Env::new(), MemorySink::new(), Box::new(registry));

    session.reload(&host);

    assert_eq!(session.env().get("SDK"), Some(r"C:\Kits\10"));
    assert_eq!(session.env().get("USER"), Some(r"D:\home"));
    assert_eq!(session.env().get("NOPE"), None, "empty value leaves the variable unset");
}

#[test]
fn session_report_lines() {
    let dir = tempfile::tempdir().unwrap();
    write(&dir.path().join("App.slnenv"), "A=1\nB=$(A)2\n");
    let host = StaticHost::new(dir.path().join("App.sln"), "Debug", "x64");
    let mut session = SessionController::new(Env::new(), MemorySink::new(), Box::new(NoRegistry));

    session.reload(&host);
    session.reload(&host);

    let root = dir.path().join("App.slnenv");
    let loaded = format!("Solution Environment {} loaded", root.display());
    assert_eq!(
        session.sink().lines(),
        [
            "SET A = 1",
            "SET B = 12",
            loaded.as_str(),
            "SET B = ",
            "SET A = ",
            "SET A = 1",
            "SET B = 12",
            loaded.as_str(),
        ]
    );
}

// =============================================================================
// Triggers
// =============================================================================

#[test]
fn session_serve_from_another_thread() {
    let dir = tempfile::tempdir().unwrap();
    write(&dir.path().join("App.slnenv"), "Release:MODE=release\nDebug:MODE=debug\n");
    let host = StaticHost::new(dir.path().join("App.sln"), "Release", "x64");
    let mut session = SessionController::new(Env::new(), MemorySink::new(), Box::new(NoRegistry));

    let (tx, rx) = flume::bounded(1);
    let producer = std::thread::spawn(move || {
        tx.send(Trigger::SolutionOpened).unwrap();
        tx.send(Trigger::EnterRunMode(RunReason::Other)).unwrap();
        tx.send(Trigger::BuildBegin).unwrap();
    });

    assert_eq!(session.serve(&rx, &host), 2);
    producer.join().unwrap();
    assert_eq!(session.env().get("MODE"), Some("release"));
}

#[test]
fn session_failure_then_recovery() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("App.slnenv");
    write(&root, "FIRST=1\nthis line is broken\n");
    let host = StaticHost::new(dir.path().join("App.sln"), "Debug", "x64");
    let mut session = SessionController::new(Env::new(), MemorySink::new(), Box::new(NoRegistry));

    let outcome = session.reload(&host);
    assert!(outcome.is_failed());
    assert_eq!(session.env().get("FIRST"), Some("1"), "no rollback of a failed pass");

    write(&root, "SECOND=2\n");
    let outcome = session.reload(&host);
    assert!(matches!(outcome, ReloadOutcome::Loaded { .. }));
    assert_eq!(session.env().get("FIRST"), None, "the next reload reverts it");
    assert_eq!(session.env().get("SECOND"), Some("2"));
}
