use anyhow::Result;
use insta::assert_snapshot;
use pretty_assertions::assert_eq;

use crate::{CliTest, stderr, stdout};

#[test]
fn test_scan_lists_candidates() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        "src/A.tsx",
        "export const A = () => (\n  <div>\n    <p>Save changes</p>\n    <p>Welcome back</p>\n  </div>\n);\n",
    )?;
    test.write_file(
        "src/B.tsx",
        "export const B = () => <button title=\"Save changes\" />;\n",
    )?;
    test.write_file("src/util.ts", "export const x = 1;\n")?;

    let output = test.scan_command().output()?;

    assert_eq!(output.status.code(), Some(1));
    assert_snapshot!(stdout(&output), @r#"
    Top 20 strings:
      2  "Save changes"
      1  "Welcome back"

    src/A.tsx
      3 (text content): "Save changes"
      4 (text content): "Welcome back"
    src/B.tsx
      1 (attributes): "Save changes"

    ✘ 3 candidate string(s), 2 unique, in 2 file(s) (3 file(s) scanned)
    "#);

    // Scanning never writes.
    assert!(test.read_file("src/A.tsx")?.contains("<p>Save changes</p>"));
    assert!(!test.root().join("i18n-codemod.modified.txt").exists());
    assert!(!test.root().join("i18n-codemod.manual.txt").exists());

    Ok(())
}

#[test]
fn test_scan_top_limits_ranking() -> Result<()> {
    let test = CliTest::with_file(
        "src/A.tsx",
        "export const A = () => <div><p>Save changes</p><p>Welcome back</p></div>;\n",
    )?;

    let output = test.scan_command().args(["--top", "1"]).output()?;

    let out = stdout(&output);
    assert!(out.starts_with("Top 1 strings:\n  1  \"Save changes\"\n\n"));

    Ok(())
}

#[test]
fn test_scan_clean_project() -> Result<()> {
    let test = CliTest::with_file("src/util.ts", "export const x = 1;\n")?;

    let output = test.scan_command().output()?;

    assert!(output.status.success());
    assert_snapshot!(stdout(&output), @"✓ No convertible strings found in 1 file(s)");

    Ok(())
}

#[test]
fn test_scan_respects_ignores_and_test_files() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        ".i18n-codemod.json",
        r#"{ "includes": ["src"], "ignores": ["src/legacy"] }"#,
    )?;
    test.write_file(
        "src/legacy/Old.tsx",
        "export const O = () => <p>Welcome back</p>;\n",
    )?;
    test.write_file(
        "src/A.test.tsx",
        "export const T = () => <p>Welcome back</p>;\n",
    )?;
    test.write_file(
        "src/node_modules/lib/index.js",
        "export const L = () => <p>Welcome back</p>;\n",
    )?;
    test.write_file(
        "other/Outside.tsx",
        "export const X = () => <p>Welcome back</p>;\n",
    )?;

    let output = test.scan_command().output()?;

    assert!(output.status.success(), "stdout: {}", stdout(&output));
    assert!(stdout(&output).contains("in 0 file(s)"));

    Ok(())
}

#[test]
fn test_scan_path_argument() -> Result<()> {
    let test = CliTest::with_file(
        "web/src/A.tsx",
        "export const A = () => <p>Welcome back</p>;\n",
    )?;

    let output = test.scan_command().arg("web").output()?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("src/A.tsx\n  1 (text content): \"Welcome back\""));

    Ok(())
}

#[test]
fn test_scan_parse_errors_are_warnings() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("src/Broken.tsx", "export const B = () => <p>Oops\n")?;
    test.write_file("src/A.tsx", "export const A = () => <p>Welcome back</p>;\n")?;

    let output = test.scan_command().output()?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("warning: 1 file(s) could not be parsed (use -v for details)"));

    let verbose = test.scan_command().arg("-v").output()?;
    assert!(stderr(&verbose).contains("warning: failed to parse src/Broken.tsx"));

    Ok(())
}
