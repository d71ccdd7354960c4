// slnenv-rs: Solution Environment loader
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Tests for the definition-file interpreter.

use std::path::{Path, PathBuf};

use super::condition::Condition;
use super::directive::{Assignment, Directive, IncludeKind, MalformedLine, parse_line};
use super::parser::{ParseContext, Parser};
use super::resolve::{resolve, split_registry_token};
use super::seeds::{SOLUTION_NAME, SeedVariables, path_root};
use crate::core::env::container::Env;
use crate::core::output::MemorySink;
use crate::core::registry::{MemoryRegistry, NoRegistry, RegistryRoot};
use crate::error::ParseError;
use crate::journal::TransactionLog;

// =============================================================================
// Condition
// =============================================================================

#[test]
fn test_condition_parse_forms() {
    let both = Condition::parse("Debug|x64");
    assert_eq!(both.configuration(), Some("Debug"));
    assert_eq!(both.platform(), Some("x64"));

    let config_only = Condition::parse("Debug");
    assert_eq!(config_only.configuration(), Some("Debug"));
    assert_eq!(config_only.platform(), None);

    let platform_only = Condition::parse("|x64");
    assert_eq!(platform_only.configuration(), None);
    assert_eq!(platform_only.platform(), Some("x64"));

    assert_eq!(Condition::parse("Debug|"), Condition::new(Some("Debug"), None));
    assert_eq!(Condition::parse(""), Condition::default());
}

#[test]
fn test_condition_platform_keeps_later_pipes() {
    let condition = Condition::parse("Debug|Mixed|Platforms");
    assert_eq!(condition.platform(), Some("Mixed|Platforms"));
}

#[test]
fn test_condition_matching() {
    let both = Condition::parse("Debug|x64");
    assert!(both.matches("Debug", "x64"));
    assert!(!both.matches("Debug", "Win32"));
    assert!(!both.matches("Release", "x64"));
    assert!(!both.matches("debug", "x64"), "matching is case-sensitive");

    assert!(Condition::parse("Debug").matches("Debug", "Win32"));
    assert!(Condition::parse("|x64").matches("Release", "x64"));
    assert!(Condition::default().matches("Anything", "Anywhere"));
}

#[test]
fn test_condition_display() {
    assert_eq!(Condition::parse("Debug|x64").to_string(), "Debug|x64");
    assert_eq!(Condition::parse("|x64").to_string(), "|x64");
    assert_eq!(Condition::parse("Release").to_string(), "Release");
}

// =============================================================================
// Directive
// =============================================================================

#[test]
fn test_parse_line_skips_blank_and_comments() {
    assert_eq!(parse_line(""), Ok(None));
    assert_eq!(parse_line("   \t "), Ok(None));
    assert_eq!(parse_line("-- PATH=ignored"), Ok(None));
    assert_eq!(parse_line("   --indented comment"), Ok(None));
}

#[test]
fn test_parse_line_includes() {
    assert_eq!(
        parse_line("include common.slnenv"),
        Ok(Some(Directive::Include {
            kind: IncludeKind::Include,
            target: "common.slnenv".to_string(),
        }))
    );
    assert_eq!(
        parse_line("ForceInclude   $(SolutionDir)/base.slnenv  "),
        Ok(Some(Directive::Include {
            kind: IncludeKind::ForceInclude,
            target: "$(SolutionDir)/base.slnenv".to_string(),
        }))
    );
}

#[test]
fn test_parse_line_malformed() {
    assert_eq!(parse_line("include"), Err(MalformedLine));
    assert_eq!(parse_line("JUSTAWORD"), Err(MalformedLine));
    assert_eq!(parse_line("require other.slnenv"), Err(MalformedLine));
}

#[test]
fn test_parse_line_assignments() {
    assert_eq!(
        parse_line("  PATH = $(SolutionDir)\\tools;$(PATH) "),
        Ok(Some(Directive::Assign(Assignment {
            condition: None,
            name: "PATH".to_string(),
            value: "$(SolutionDir)\\tools;$(PATH)".to_string(),
        })))
    );
    assert_eq!(
        parse_line("Debug|x64:BUILD_MODE=fast"),
        Ok(Some(Directive::Assign(Assignment {
            condition: Some(Condition::parse("Debug|x64")),
            name: "BUILD_MODE".to_string(),
            value: "fast".to_string(),
        })))
    );
}

#[test]
fn test_parse_line_value_keeps_later_equals() {
    let Ok(Some(Directive::Assign(assignment))) = parse_line("FLAGS=-DA=1 -DB=2") else {
        panic!("expected an assignment");
    };
    assert_eq!(assignment.name, "FLAGS");
    assert_eq!(assignment.value, "-DA=1 -DB=2");
}

#[test]
fn test_parse_line_equals_wins_over_include_keyword() {
    let Ok(Some(Directive::Assign(assignment))) = parse_line("include x=y") else {
        panic!("a line with '=' is always an assignment");
    };
    assert_eq!(assignment.name, "include x");
}

// =============================================================================
// Seeds
// =============================================================================

#[test]
fn test_seed_lookup_is_case_insensitive() {
    let seeds = SeedVariables::new()
        .with("SolutionName", "App")
        .with("solutionname", "Shadowed");
    assert_eq!(seeds.get("SOLUTIONNAME"), Some("App"));
    assert_eq!(seeds.get("Missing"), None);
    assert_eq!(seeds.len(), 2);
}

#[cfg(unix)]
#[test]
fn test_seeds_for_solution() {
    let seeds = SeedVariables::for_solution(Path::new("/proj/App.sln"), "Debug", "x64");
    let pairs: Vec<_> = seeds.iter().map(|s| (s.name(), s.value())).collect();
    assert_eq!(
        pairs,
        [
            ("SolutionDir", "/proj"),
            ("SolutionName", "App"),
            ("SolutionDrive", "/"),
            ("SolutionConfiguration", "Debug"),
            ("SolutionPlatform", "x64"),
        ]
    );
}

#[cfg(windows)]
#[test]
fn test_seeds_for_solution() {
    let seeds = SeedVariables::for_solution(Path::new(r"C:\proj\App.sln"), "Debug", "x64");
    assert_eq!(seeds.get("SolutionDir"), Some(r"C:\proj"));
    assert_eq!(seeds.get("SolutionDrive"), Some(r"C:\"));
    assert_eq!(seeds.get("SolutionName"), Some("App"));
}

#[test]
fn test_path_root_of_relative_path_is_empty() {
    assert_eq!(path_root(Path::new("App.sln")), "");
}

// =============================================================================
// Resolver
// =============================================================================

fn registry() -> MemoryRegistry {
    MemoryRegistry::new()
        .with_value(
            RegistryRoot::LocalMachine,
            r"SOFTWARE\Kits",
            "KitsRoot10",
            r"C:\Kits\10",
        )
        .with_value(
            RegistryRoot::CurrentUser,
            r"Environment\App",
            "Home",
            r"D:\home",
        )
}

#[test]
fn test_resolve_seed_shadows_environment() {
    let seeds = SeedVariables::new().with(SOLUTION_NAME, "App");
    let mut env = Env::new();
    env.set("SolutionName", "FromEnvironment");
    env.set("HOME", "/home/user");

    let resolved = resolve("$(solutionname)-$(HOME)", &seeds, &env, &NoRegistry);
    assert_eq!(resolved, "App-/home/user");
}

#[test]
fn test_resolve_unknown_variable_is_empty() {
    let resolved = resolve("[$(NOPE)]", &SeedVariables::new(), &Env::new(), &NoRegistry);
    assert_eq!(resolved, "[]");
}

#[test]
fn test_resolve_leaves_non_tokens_alone() {
    let resolved = resolve(
        "$HOME $(with space) $() %PATH%",
        &SeedVariables::new(),
        &Env::new(),
        &NoRegistry,
    );
    assert_eq!(resolved, "$HOME $(with space) $() %PATH%");
}

#[test]
fn test_resolve_registry_tokens() {
    let resolved = resolve(
        r"%(HKLM\SOFTWARE\Kits\KitsRoot10)\bin;%(HKCU\Environment\App\Home)",
        &SeedVariables::new(),
        &Env::new(),
        &registry(),
    );
    assert_eq!(resolved, r"C:\Kits\10\bin;D:\home");
}

#[test]
fn test_resolve_registry_failures_are_empty() {
    let seeds = SeedVariables::new();
    let env = Env::new();
    let registry = registry();
    for token in [
        r"%(HKCR\SOFTWARE\Kits\KitsRoot10)",
        r"%(HKLM\SOFTWARE\Missing\KitsRoot10)",
        r"%(HKLM\SOFTWARE\Kits\Missing)",
        r"%(HKLM)",
        r"%(HKLMSOFTWARE\Kits\KitsRoot10)",
        r"%(HK)",
    ] {
        assert_eq!(resolve(token, &seeds, &env, &registry), "", "{token}");
    }
}

#[test]
fn test_resolve_variables_before_registry() {
    let seeds = SeedVariables::new().with("Hive", "HKLM");
    let mut env = Env::new();
    env.set("KITKEY", r"SOFTWARE\Kits");

    let resolved = resolve(r"%($(Hive)\$(KITKEY)\KitsRoot10)", &seeds, &env, &registry());
    assert_eq!(resolved, r"C:\Kits\10");
}

#[test]
fn test_split_registry_token() {
    assert_eq!(
        split_registry_token(r"HKCU\Software\Vendor\Value"),
        Some((RegistryRoot::CurrentUser, r"Software\Vendor", "Value"))
    );
    assert_eq!(
        split_registry_token(r"HKLM\Value"),
        None,
        "a value name alone has no key path separator"
    );
    assert_eq!(
        split_registry_token(r"HKLM\\Value"),
        Some((RegistryRoot::LocalMachine, "", "Value"))
    );
}

// =============================================================================
// Parser
// =============================================================================

struct Harness {
    context: ParseContext,
    env: Env,
    registry: MemoryRegistry,
    log: TransactionLog,
    sink: MemorySink,
}

impl Harness {
    fn new(configuration: &str, platform: &str) -> Self {
        let mut env = Env::new();
        env.set("PATH", "/usr/bin");
        Self {
            context: ParseContext::for_solution(
                Path::new("/proj/App.sln"),
                configuration,
                platform,
            ),
            env,
            registry: registry(),
            log: TransactionLog::new(),
            sink: MemorySink::new(),
        }
    }

    fn parse(&mut self, path: &Path) -> Result<bool, ParseError> {
        Parser::new(
            &self.context,
            &mut self.env,
            &self.registry,
            &mut self.log,
            &mut self.sink,
        )
        .parse_file(path)
    }
}

fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_parse_missing_file_returns_false() {
    let dir = tempfile::tempdir().unwrap();
    let mut harness = Harness::new("Debug", "x64");

    assert!(!harness.parse(&dir.path().join("nope.slnenv")).unwrap());
    assert!(harness.log.is_empty());
    assert!(harness.sink.lines().is_empty());
}

#[test]
fn test_parse_assignments_and_conditions() {
    let dir = tempfile::tempdir().unwrap();
    let root = write(
        dir.path(),
        "App.slnenv",
        "-- build settings\n\
         PATH=$(SolutionDir)/tools:$(PATH)\n\
         Debug|x64:BUILD_MODE=fast\n\
         Release:BUILD_MODE=slow\n\
         |Win32:ARCH=x86\n\
         |x64:ARCH=x64\n",
    );
    let mut harness = Harness::new("Debug", "x64");

    assert!(harness.parse(&root).unwrap());

    assert_eq!(harness.env.get("PATH"), Some("/proj/tools:/usr/bin"));
    assert_eq!(harness.env.get("BUILD_MODE"), Some("fast"));
    assert_eq!(harness.env.get("ARCH"), Some("x64"));
    insta::assert_snapshot!(harness.sink.lines().join("\n"), @r"
    SET PATH = /proj/tools:/usr/bin
    SET BUILD_MODE = fast
    SET ARCH = x64
    ");
}

#[test]
fn test_parse_reassignment_keeps_first_prior() {
    let dir = tempfile::tempdir().unwrap();
    let root = write(dir.path(), "App.slnenv", "PATH=/a:$(PATH)\nPATH=/b:$(PATH)\n");
    let mut harness = Harness::new("Debug", "x64");

    harness.parse(&root).unwrap();

    assert_eq!(harness.env.get("PATH"), Some("/b:/a:/usr/bin"));
    assert_eq!(harness.log.len(), 1);
    assert_eq!(harness.log.changes()[0].prior().as_deref(), Some("/usr/bin"));
}

#[test]
fn test_parse_skipped_condition_with_empty_name_is_not_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let root = write(dir.path(), "App.slnenv", "Release:=x\n");
    let mut harness = Harness::new("Debug", "x64");

    assert!(harness.parse(&root).unwrap());
    assert!(harness.log.is_empty());
}

#[test]
fn test_parse_empty_name_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let root = write(dir.path(), "App.slnenv", "A=1\n=value\n");
    let mut harness = Harness::new("Debug", "x64");

    let err = harness.parse(&root).unwrap_err();
    assert!(matches!(err, ParseError::EmptyName { line: 2, .. }), "{err:?}");
    assert_eq!(harness.env.get("A"), Some("1"), "earlier lines stay applied");
}

#[test]
fn test_parse_malformed_line_reports_file_and_line() {
    let dir = tempfile::tempdir().unwrap();
    let root = write(dir.path(), "App.slnenv", "-- header\n\nnot a directive\n");
    let mut harness = Harness::new("Debug", "x64");

    let err = harness.parse(&root).unwrap_err();
    let ParseError::MalformedLine { file, line } = &err else {
        panic!("unexpected error {err:?}");
    };
    assert_eq!(*line, 3);
    assert_eq!(file, &root.display().to_string());
}

#[test]
fn test_parse_include_shares_context() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("env")).unwrap();
    write(
        &dir.path().join("env"),
        "common.slnenv",
        "Debug:COMMON=$(SolutionName)-$(SolutionConfiguration)\n",
    );
    let root = write(
        dir.path(),
        "App.slnenv",
        "include env/common.slnenv\nAFTER=$(COMMON)!\n",
    );
    let mut harness = Harness::new("Debug", "x64");

    assert!(harness.parse(&root).unwrap());
    assert_eq!(harness.env.get("COMMON"), Some("App-Debug"));
    assert_eq!(harness.env.get("AFTER"), Some("App-Debug!"));
}

#[test]
fn test_parse_include_target_is_resolved() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "x64.slnenv", "PLATFORM_FILE=yes\n");
    let root = write(
        dir.path(),
        "App.slnenv",
        "include $(SolutionPlatform).slnenv\n",
    );
    let mut harness = Harness::new("Debug", "x64");

    harness.parse(&root).unwrap();
    assert_eq!(harness.env.get("PLATFORM_FILE"), Some("yes"));
}

#[test]
fn test_parse_missing_include_is_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let root = write(dir.path(), "App.slnenv", "include missing.slnenv\nA=1\n");
    let mut harness = Harness::new("Debug", "x64");

    assert!(harness.parse(&root).unwrap());
    assert_eq!(harness.env.get("A"), Some("1"));
}

#[test]
fn test_parse_missing_forceinclude_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let root = write(
        dir.path(),
        "App.slnenv",
        "A=1\nforceinclude missing.slnenv\nB=2\n",
    );
    let mut harness = Harness::new("Debug", "x64");

    let err = harness.parse(&root).unwrap_err();
    let ParseError::MissingForceInclude { line, target, .. } = &err else {
        panic!("unexpected error {err:?}");
    };
    assert_eq!(*line, 2);
    assert!(target.ends_with("missing.slnenv"));
    assert_eq!(harness.env.get("A"), Some("1"));
    assert_eq!(harness.env.get("B"), None);
}

#[test]
fn test_parse_error_in_included_file_unwinds() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "bad.slnenv", "OK=1\nbroken\n");
    let root = write(dir.path(), "App.slnenv", "include bad.slnenv\nNEVER=1\n");
    let mut harness = Harness::new("Debug", "x64");

    let err = harness.parse(&root).unwrap_err();
    let ParseError::MalformedLine { file, line } = &err else {
        panic!("unexpected error {err:?}");
    };
    assert!(file.ends_with("bad.slnenv"));
    assert_eq!(*line, 2);
    assert_eq!(harness.env.get("OK"), Some("1"));
    assert_eq!(harness.env.get("NEVER"), None);
}

#[test]
fn test_parse_include_cycle_is_detected() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "a.slnenv", "A=1\ninclude b.slnenv\n");
    write(dir.path(), "b.slnenv", "B=1\ninclude a.slnenv\n");
    let mut harness = Harness::new("Debug", "x64");

    let err = harness.parse(&dir.path().join("a.slnenv")).unwrap_err();
    let ParseError::IncludeCycle { file, line, chain, .. } = &err else {
        panic!("unexpected error {err:?}");
    };
    assert!(file.ends_with("b.slnenv"));
    assert_eq!(*line, 2);
    assert_eq!(chain.matches(" -> ").count(), 2);
}

#[test]
fn test_parse_self_include_is_detected() {
    let dir = tempfile::tempdir().unwrap();
    let root = write(dir.path(), "App.slnenv", "forceinclude App.slnenv\n");
    let mut harness = Harness::new("Debug", "x64");

    assert!(matches!(
        harness.parse(&root),
        Err(ParseError::IncludeCycle { line: 1, .. })
    ));
}

#[test]
fn test_parse_same_file_twice_is_not_a_cycle() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "inc.slnenv", "COUNT=$(COUNT)x\n");
    let root = write(
        dir.path(),
        "App.slnenv",
        "include inc.slnenv\ninclude inc.slnenv\n",
    );
    let mut harness = Harness::new("Debug", "x64");

    harness.parse(&root).unwrap();
    assert_eq!(harness.env.get("COUNT"), Some("xx"));
}

#[test]
fn test_parse_registry_value() {
    let dir = tempfile::tempdir().unwrap();
    let root = write(
        dir.path(),
        "App.slnenv",
        "KITS=%(HKLM\\SOFTWARE\\Kits\\KitsRoot10)\n",
    );
    let mut harness = Harness::new("Debug", "x64");

    harness.parse(&root).unwrap();
    assert_eq!(harness.env.get("KITS"), Some(r"C:\Kits\10"));
}

#[test]
fn test_parse_empty_value_unsets() {
    let dir = tempfile::tempdir().unwrap();
    let root = write(dir.path(), "App.slnenv", "PATH=\n");
    let mut harness = Harness::new("Debug", "x64");

    harness.parse(&root).unwrap();
    assert_eq!(harness.env.get("PATH"), None);
    assert_eq!(harness.log.changes()[0].prior().as_deref(), Some("/usr/bin"));
    assert_eq!(harness.sink.lines(), ["SET PATH = "]);
}

#[test]
fn test_parse_utf16_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("App.slnenv");
    let mut bytes = vec![0xff, 0xfe];
    for unit in "WIDE=yes\r\n".encode_utf16() {
        bytes.extend_from_slice(&unit.to_le_bytes());
    }
    std::fs::write(&path, bytes).unwrap();
    let mut harness = Harness::new("Debug", "x64");

    harness.parse(&path).unwrap();
    assert_eq!(harness.env.get("WIDE"), Some("yes"));
}
