use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;

use crate::CliTest;

fn project() -> Result<CliTest> {
    let test = CliTest::with_file(
        "locales/en.json",
        r#"{ "8b1a9953": "Hello", "83218ac3": "Welcome" }"#,
    )?;
    test.write_file("locales/de.json", r#"{ "8b1a9953": "Hallo" }"#)?;
    test.write_file(
        "locales/fr.json",
        r#"{ "8b1a9953": "Bonjour", "83218ac3": "Bienvenue" }"#,
    )?;
    Ok(test)
}

#[test]
fn test_enforce_warn() -> Result<()> {
    let test = project()?;

    assert_cmd_snapshot!(test.command().arg("enforce"), @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    warning: 1 translation missing across 1 locale

    ----- stderr -----
    warning: [de] missing translation for key 83218ac3: "Welcome"
    "#);

    Ok(())
}

#[test]
fn test_enforce_strict() -> Result<()> {
    let test = project()?;

    assert_cmd_snapshot!(test.command().args(["enforce", "--mode", "strict"]), @r#"
    success: false
    exit_code: 1
    ----- stdout -----
    ✘ 1 translation missing across 1 locale

    ----- stderr -----
    error: [de] missing translation for key 83218ac3: "Welcome"
    "#);

    Ok(())
}

#[test]
fn test_enforce_strict_from_config() -> Result<()> {
    let test = project()?;
    test.write_file(".l10nrc.json", r#"{ "enforce": "strict" }"#)?;

    assert_cmd_snapshot!(test.command().arg("enforce"), @r#"
    success: false
    exit_code: 1
    ----- stdout -----
    ✘ 1 translation missing across 1 locale

    ----- stderr -----
    error: [de] missing translation for key 83218ac3: "Welcome"
    "#);

    Ok(())
}

#[test]
fn test_enforce_silent() -> Result<()> {
    let test = project()?;

    assert_cmd_snapshot!(test.command().args(["enforce", "--mode", "silent"]), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Enforcement is silent; no checks run

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_enforce_complete() -> Result<()> {
    let test = project()?;
    test.write_file(
        "locales/de.json",
        r#"{ "8b1a9953": "Hallo", "83218ac3": "Willkommen" }"#,
    )?;

    assert_cmd_snapshot!(test.command().args(["enforce", "--mode", "strict"]), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Checked 3 locale files - no missing translations

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_enforce_without_locales() -> Result<()> {
    let test = CliTest::new()?;

    assert_cmd_snapshot!(test.command().arg("enforce"), @r"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    Error: Locales directory './locales' does not exist.
    Hint: Run `l10n extract` first or check the 'localesDir' setting.
    ");

    Ok(())
}
