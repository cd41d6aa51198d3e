use anyhow::{Context, Result};
use insta::assert_snapshot;
use serde_json::Value;

use crate::{CliTest, stderr, stdout};

/// Validates config file structure and default values.
fn assert_config_content(content: &str) -> Result<()> {
    let parsed: Value = serde_json::from_str(content).context("Config should be valid JSON")?;

    for field in [
        "translatableAttributes",
        "lookupFunction",
        "groupMode",
        "defaultNamespace",
        "namespaces",
        "includes",
    ] {
        assert!(parsed.get(field).is_some(), "Config should have '{field}' field");
    }
    assert_eq!(parsed["lookupFunction"], "t");
    assert_eq!(parsed["defaultNamespace"], "features");

    // 2-space indentation
    assert!(content.contains("\n  \""));

    Ok(())
}

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("init").output()?;

    assert!(output.status.success());
    assert_snapshot!(stdout(&output), @"✓ Created .i18n-codemod.json");
    assert!(test.root().join(".i18n-codemod.json").exists());

    let content = test.read_file(".i18n-codemod.json")?;
    assert_config_content(&content)?;

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".i18n-codemod.json", "{}")?;

    let output = test.command().arg("init").output()?;

    assert_eq!(output.status.code(), Some(2));
    assert_snapshot!(stderr(&output), @"error: .i18n-codemod.json already exists");
    assert_eq!(test.read_file(".i18n-codemod.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;

    test.command().arg("init").output()?;
    test.write_file(
        "src/App.tsx",
        "export const App = () => <div>Welcome back</div>;\n",
    )?;

    let output = test.convert_command("src/App.tsx").arg("--report").output()?;
    assert!(
        output.status.success(),
        "Convert should work with initialized config. stderr: {}",
        stderr(&output)
    );
    assert!(stdout(&output).contains("features:app.welcome_back"));

    Ok(())
}
