//! Integration tests for registry loading and script dispatch
//!
//! These exercise the library end to end: a registry file on disk is
//! resolved, loaded and used to route invocations to a launcher.

use std::cell::RefCell;

use anyhow::Result;
use mbapy_cli::dispatch::{DispatchError, Dispatcher, Launcher};
use mbapy_cli::source::{load_registry_with_fallback, RegistrySource};
use mbapy_core::{CommandEntry, Registry, RegistryError};

const SCRIPTS: &str = r#"{
    "cnipa": {
        "brief": "get patents info from CNIPA.",
        "detailed": "search patents on CNIPA.\nexample: mbapy-cli cnipa -q peptide -o ./out"
    },
    "scihub": {
        "brief": "download papers and it's refs(optional) from scihub.",
        "detailed": "download by doi or ris file."
    },
    "peptide": {
        "brief": "calculate peptide related values.",
        "detailed": "sub commands: subval (sb), molecularweight (mw), mutationweight (mmw), letters"
    }
}"#;

#[derive(Default)]
struct RecordingLauncher {
    calls: RefCell<Vec<(String, Vec<String>)>>,
}

impl Launcher for &RecordingLauncher {
    fn launch(&self, entry: &CommandEntry, args: &[String]) -> Result<i32, DispatchError> {
        self.calls
            .borrow_mut()
            .push((entry.name.clone(), args.to_vec()));
        Ok(0)
    }
}

fn write_registry(dir: &tempfile::TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join("scripts-list.json");
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_registry_file_drives_dispatch() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = write_registry(&dir, SCRIPTS);

    let (registry, source) = load_registry_with_fallback(Some(path.as_path()), &path)?;
    assert_eq!(source, RegistrySource::File(path.clone()));

    let launcher = RecordingLauncher::default();
    let dispatcher = Dispatcher::new(&registry, &launcher);

    let args: Vec<String> = ["mw", "-s", "Fmoc-Cys(Acm)-Leu-OH"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    assert_eq!(dispatcher.dispatch("peptide", &args)?, 0);
    assert_eq!(dispatcher.dispatch("cnipa", &[])?, 0);

    let calls = launcher.calls.borrow();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0], ("peptide".to_string(), args));
    assert_eq!(calls[1], ("cnipa".to_string(), Vec::new()));

    Ok(())
}

#[test]
fn test_unknown_script_is_recoverable() -> Result<()> {
    let registry = Registry::load(SCRIPTS)?;
    let launcher = RecordingLauncher::default();
    let dispatcher = Dispatcher::new(&registry, &launcher);

    assert!(matches!(
        dispatcher.dispatch("nosuch", &[]),
        Err(DispatchError::UnknownScript(_))
    ));
    assert!(launcher.calls.borrow().is_empty());

    // The registry is still usable afterwards
    assert_eq!(dispatcher.dispatch("scihub", &[])?, 0);
    Ok(())
}

#[test]
fn test_every_listed_entry_is_dispatchable() -> Result<()> {
    let registry = Registry::load(SCRIPTS)?;
    let launcher = RecordingLauncher::default();
    let dispatcher = Dispatcher::new(&registry, &launcher);

    for entry in registry.list() {
        assert_eq!(registry.lookup(&entry.name)?.name, entry.name);
        dispatcher.dispatch(&entry.name, &[])?;
    }

    let dispatched: Vec<String> = launcher
        .calls
        .borrow()
        .iter()
        .map(|(name, _)| name.clone())
        .collect();
    assert_eq!(dispatched, vec!["cnipa", "scihub", "peptide"]);
    Ok(())
}

#[test]
fn test_malformed_registry_file_yields_no_registry() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_registry(
        &dir,
        r#"{"cnipa": {"brief": "get patents info from CNIPA."}, "scihub": {"brief": "b", "detailed": "d"}}"#,
    );

    let err = load_registry_with_fallback(Some(path.as_path()), &path).unwrap_err();
    let registry_err = err
        .downcast_ref::<RegistryError>()
        .expect("registry error in chain");
    assert!(matches!(registry_err, RegistryError::Malformed(_)));
}

#[test]
fn test_registry_roundtrip_through_file() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let original = Registry::load(SCRIPTS)?;
    let path = write_registry(&dir, &original.to_json()?);

    let reloaded = Registry::load_file(&path)?;
    assert_eq!(original, reloaded);
    assert_eq!(reloaded.list().len(), 3);
    Ok(())
}

#[test]
fn test_builtin_registry_when_no_file() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let (registry, source) =
        load_registry_with_fallback(None, &dir.path().join("scripts-list.json"))?;

    assert_eq!(source, RegistrySource::Builtin);
    assert_eq!(
        registry.lookup("cnipa")?.brief,
        "get patents info from CNIPA."
    );
    assert!(matches!(
        registry.lookup("nosuch"),
        Err(RegistryError::NotFound(_))
    ));
    Ok(())
}
