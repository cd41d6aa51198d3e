use anyhow::Result;
use insta::assert_snapshot;
use pretty_assertions::assert_eq;

use crate::{CliTest, stderr, stdout};

const APP: &str = r#"export const App = ({ isOpen, name }) => (
  <Panel title="Account Settings">
    <Text>Welcome back</Text>
    <Text>{isOpen ? 'Close' : 'Open'}</Text>
    <Text>{`Hello ${name}`}</Text>
    <div className="active" />
  </Panel>
);
"#;

#[test]
fn test_dry_run_reports_without_writing() -> Result<()> {
    let test = CliTest::with_file("src/App.tsx", APP)?;

    let output = test.convert_command("src/App.tsx").output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    assert!(out.starts_with("Namespace: features  Group: app\n"));
    assert!(out.contains("  attributes       1"));
    assert!(out.contains("  text content     1"));
    assert!(out.contains("  conditionals     2"));
    assert!(out.contains("  templates        1"));
    assert!(out.contains("  total            5"));
    assert!(out.contains("Dry run (use --write to apply changes)"));
    assert_eq!(test.read_file("src/App.tsx")?, APP);
    assert!(!test.root().join("i18n-codemod.modified.txt").exists());

    Ok(())
}

#[test]
fn test_write_rewrites_file() -> Result<()> {
    let test = CliTest::with_file("src/App.tsx", APP)?;

    let output = test.convert_command("src/App.tsx").arg("--write").output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("✓ Written: src/App.tsx"));

    let written = test.read_file("src/App.tsx")?;
    assert_eq!(written.lines().count(), APP.lines().count());
    assert!(written.contains(
        "title={t('features:app.account_settings', { defaultValue: 'Account Settings' })}"
    ));
    assert!(written.contains(
        "<Text>{t('features:app.welcome_back', { defaultValue: 'Welcome back' })}</Text>"
    ));
    assert!(written.contains(
        "isOpen ? t('features:app.close', { defaultValue: 'Close' }) : t('features:app.open', { defaultValue: 'Open' })"
    ));
    assert!(written.contains(
        "t('features:app.hello_name', { defaultValue: 'Hello {{name}}', name: name })"
    ));
    assert!(written.contains(r#"<div className="active" />"#));
    assert_eq!(test.read_file("i18n-codemod.modified.txt")?, "src/App.tsx\n");

    Ok(())
}

#[test]
fn test_second_run_is_a_no_op() -> Result<()> {
    let test = CliTest::with_file("src/App.tsx", APP)?;

    test.convert_command("src/App.tsx").arg("--write").output()?;
    let first = test.read_file("src/App.tsx")?;

    let output = test.convert_command("src/App.tsx").arg("--write").output()?;

    assert!(output.status.success());
    assert!(stdout(&output).contains("No translatable text found in src/App.tsx"));
    assert_eq!(test.read_file("src/App.tsx")?, first);
    assert_eq!(test.read_file("i18n-codemod.modified.txt")?, "src/App.tsx\n");

    Ok(())
}

#[test]
fn test_report_lists_unique_keys() -> Result<()> {
    let test = CliTest::with_file(
        "src/app/components/profile/Card.tsx",
        "export const Card = () => <div><p>Welcome back</p><p>Welcome back</p></div>;\n",
    )?;

    let output = test
        .convert_command("src/app/components/profile/Card.tsx")
        .arg("--report")
        .output()?;

    let out = stdout(&output);
    assert!(out.starts_with("Namespace: components  Group: profile\n"));
    assert!(out.contains("Keys:\n  components:profile.welcome_back // Welcome back\n"));
    assert_eq!(out.matches("// Welcome back").count(), 1);

    Ok(())
}

#[test]
fn test_print_shows_line_diff() -> Result<()> {
    let test = CliTest::with_file(
        "src/Hello.tsx",
        "const x = 1;\nexport const Hello = () => <p>Good morning</p>;\n",
    )?;

    let output = test.convert_command("src/Hello.tsx").arg("--print").output()?;

    let out = stdout(&output);
    assert!(out.contains(
        "--- src/Hello.tsx (original)\n\
         +++ src/Hello.tsx (modified)\n\
         - export const Hello = () => <p>Good morning</p>;\n\
         + export const Hello = () => <p>{t('features:hello.good_morning', { defaultValue: 'Good morning' })}</p>;\n"
    ));
    assert!(!out.contains("- const x = 1;"));

    Ok(())
}

#[test]
fn test_manual_review_log() -> Result<()> {
    let test = CliTest::with_file(
        "src/Link.tsx",
        "export const L = () => <p>{'Click '}<a>here</a>{' to continue'}</p>;\n",
    )?;

    let output = test.convert_command("src/Link.tsx").output()?;

    assert!(output.status.success());
    assert!(stdout(&output).contains("note: 2 site(s) need manual review"));
    assert_eq!(
        test.read_file("i18n-codemod.manual.txt")?,
        "[complex] src/Link.tsx:1 :: split-around-tag :: Click \n\
         [complex] src/Link.tsx:1 :: split-around-tag ::  to continue\n"
    );

    Ok(())
}

#[test]
fn test_verbose_logs_each_decision() -> Result<()> {
    let test = CliTest::with_file(
        "src/Hello.tsx",
        "export const Hello = () => <section><p>Good morning</p><p>x</p></section>;\n",
    )?;

    let output = test.convert_command("src/Hello.tsx").arg("-v").output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let err = stderr(&output);
    assert!(err.contains("key=features:hello.good_morning tag=p depth=2"));
    assert!(err.contains("text=x tag=p depth=2"));

    Ok(())
}

#[test]
fn test_convert_subcommand_alias() -> Result<()> {
    let test = CliTest::with_file("src/App.tsx", APP)?;

    let output = test
        .command()
        .args(["convert", "-f", "src/App.tsx", "--write"])
        .output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(test.read_file("src/App.tsx")?.contains("features:app.welcome_back"));

    Ok(())
}

#[test]
fn test_missing_file_argument() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("--file <PATH>"));
    assert!(stdout(&output).is_empty());

    Ok(())
}

#[test]
fn test_nonexistent_file() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.convert_command("src/Missing.tsx").output()?;

    assert_eq!(output.status.code(), Some(2));
    assert_snapshot!(stderr(&output), @"error: File not found: src/Missing.tsx");

    Ok(())
}

#[test]
fn test_parse_error_leaves_file_untouched() -> Result<()> {
    let source = "export const Broken = () => <p>Unclosed\n";
    let test = CliTest::with_file("src/Broken.tsx", source)?;

    let output = test.convert_command("src/Broken.tsx").arg("--write").output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("failed to parse src/Broken.tsx"));
    assert_eq!(test.read_file("src/Broken.tsx")?, source);
    assert!(!test.root().join("i18n-codemod.modified.txt").exists());

    Ok(())
}

#[test]
fn test_keymap_from_config_directory() -> Result<()> {
    let test = CliTest::with_file(
        "src/Saved.tsx",
        "export const S = () => <p>Your settings were saved successfully</p>;\n",
    )?;
    test.write_file(".i18n-codemod.json", r#"{ "keymapPath": "keymap.json" }"#)?;
    test.write_file("keymap.json", r#"{ "settings were saved": "settings_saved" }"#)?;

    let output = test
        .convert_command("src/Saved.tsx")
        .arg("--report")
        .output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("features:saved.settings_saved // Your settings were saved successfully"));

    Ok(())
}
