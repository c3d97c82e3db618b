use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;
use pretty_assertions::assert_eq;

use crate::CliTest;

#[test]
fn test_simulate_default_locales() -> Result<()> {
    let test = CliTest::with_file(
        "locales/en.json",
        r#"{ "8b1a9953": "Hello", "k2": "Read <a href=\"/more\">more</a>" }"#,
    )?;

    assert_cmd_snapshot!(test.command().arg("simulate"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
      wrote ./locales/de.json
      wrote ./locales/es.json
      wrote ./locales/fr.json
    ✓ Simulated 3 locales

    ----- stderr -----
    ");

    let expected = "{\n  \"8b1a9953\": \"Hélló\",\n  \"k2\": \"Réád <a href=\\\"/more\\\">móré</a>\"\n}\n";
    for locale in ["de", "es", "fr"] {
        assert_eq!(test.read_file(&format!("locales/{}.json", locale))?, expected);
    }

    Ok(())
}

#[test]
fn test_simulate_locales_flag() -> Result<()> {
    let test = CliTest::with_file("locales/en.json", r#"{ "8b1a9953": "Hello" }"#)?;

    assert_cmd_snapshot!(test.command().args(["simulate", "--locales", "xx,yy"]), @r"
    success: true
    exit_code: 0
    ----- stdout -----
      wrote ./locales/xx.json
      wrote ./locales/yy.json
    ✓ Simulated 2 locales

    ----- stderr -----
    ");
    assert!(test.root().join("locales/xx.json").exists());
    assert!(test.root().join("locales/yy.json").exists());
    assert!(!test.root().join("locales/de.json").exists());

    Ok(())
}

#[test]
fn test_simulate_custom_table() -> Result<()> {
    let test = CliTest::with_file("locales/en.json", r#"{ "8b1a9953": "Hello" }"#)?;
    test.write_file(
        ".l10nrc.json",
        r#"{ "simulate": { "locales": ["xx"], "dictionary": { "l": "L", "He": "Ħ" } } }"#,
    )?;

    assert_cmd_snapshot!(test.command().arg("simulate"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
      wrote ./locales/xx.json
    ✓ Simulated 1 locale

    ----- stderr -----
    ");
    assert_eq!(
        test.read_file("locales/xx.json")?,
        "{\n  \"8b1a9953\": \"ĦLLo\"\n}\n"
    );

    Ok(())
}

#[test]
fn test_simulate_then_localize() -> Result<()> {
    let test = CliTest::with_file("index.html", "<p>Hello</p>")?;
    test.run(&["extract"])?;

    let output = test.run(&["simulate", "--locales", "xx"])?;
    assert!(output.status.success());
    let output = test.run(&["localize"])?;
    assert!(output.status.success());

    assert_eq!(test.read_file("xx/index.html")?, "<p>Hélló</p>");

    Ok(())
}

#[test]
fn test_simulate_requires_native() -> Result<()> {
    let test = CliTest::new()?;

    assert_cmd_snapshot!(test.command().arg("simulate"), @r"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    Error: Native locale file './locales/en.json' not found.
    Hint: Run `l10n extract` first.
    ");

    Ok(())
}
