use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;
use pretty_assertions::assert_eq;

use crate::{CliTest, stderr};

const PAGE: &str = r#"<html>
  <head><title>Welcome</title></head>
  <body>
    <p>Hello</p>
    <img src="/logo.png" alt="contents of alt attribute">
    <a href="/about.html">About us</a>
  </body>
</html>
"#;

fn project() -> Result<CliTest> {
    let test = CliTest::with_file("www/index.html", PAGE)?;
    test.write_file(".l10nrc.json", r#"{ "sourceRoot": "./www" }"#)?;
    test.write_file(
        "locales/de.json",
        r#"{
  "8b1a9953": "Hallo",
  "83218ac3": "Willkommen",
  "6cf62aab": "Inhalt des Alt-Attributs"
}"#,
    )?;
    Ok(test)
}

#[test]
fn test_extract_then_localize() -> Result<()> {
    let test = project()?;

    let output = test.run(&["extract"])?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    assert_cmd_snapshot!(test.command().arg("localize"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Localized 1 document into 1 file (de)

    ----- stderr -----
    ");

    assert_eq!(
        test.read_file("www/de/index.html")?,
        r#"<html>
  <head><title>Willkommen</title></head>
  <body>
    <p>Hallo</p>
    <img src="/logo.png" alt="Inhalt des Alt-Attributs">
    <a href="/about.html">About us</a>
  </body>
</html>
"#
    );
    // The source document is never modified.
    assert_eq!(test.read_file("www/index.html")?, PAGE);

    Ok(())
}

#[test]
fn test_localize_links_and_out_dir() -> Result<()> {
    let test = project()?;
    test.run(&["extract"])?;

    assert_cmd_snapshot!(
        test.command()
            .args(["localize", "--out-dir", "dist", "--localize-links"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Localized 1 document into 1 file (de)

    ----- stderr -----
    "
    );

    let localized = test.read_file("dist/de/index.html")?;
    assert!(localized.contains(r#"<a href="/de/about.html">"#));
    assert!(localized.contains(r#"<img src="/logo.png""#));
    assert!(!test.root().join("www/de").exists());

    Ok(())
}

#[test]
fn test_localize_every_target_locale() -> Result<()> {
    let test = project()?;
    test.write_file("locales/fr.json", r#"{ "8b1a9953": "Bonjour" }"#)?;
    test.run(&["extract"])?;

    assert_cmd_snapshot!(test.command().arg("localize"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Localized 1 document into 2 files (de, fr)

    ----- stderr -----
    ");

    let french = test.read_file("www/fr/index.html")?;
    assert!(french.contains("<p>Bonjour</p>"));
    // Missing translations keep the native text.
    assert!(french.contains("<title>Welcome</title>"));
    assert!(!test.root().join("www/en").exists());

    Ok(())
}

#[test]
fn test_localize_by_key() -> Result<()> {
    let test = CliTest::with_file("index.html", "<p>{{{8b1a9953}}} {{{unknown}}}</p>")?;
    test.write_file("locales/en.json", r#"{ "8b1a9953": "Hello" }"#)?;
    test.write_file("locales/de.json", r#"{ "8b1a9953": "Hallo" }"#)?;

    assert_cmd_snapshot!(test.command().args(["localize", "--search-by", "key"]), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Localized 1 document into 1 file (de)

    ----- stderr -----
    ");
    assert_eq!(
        test.read_file("de/index.html")?,
        "<p>Hallo {{{unknown}}}</p>"
    );

    Ok(())
}

#[test]
fn test_localize_without_native_dictionary() -> Result<()> {
    let test = CliTest::with_file("index.html", "<p>Hello</p>")?;
    test.write_file("locales/de.json", "{}")?;

    assert_cmd_snapshot!(test.command().arg("localize"), @r"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    Error: Native locale file 'en.json' not found in './locales'.
    Hint: Run `l10n extract` first.
    ");

    Ok(())
}

#[test]
fn test_localize_invalid_locale_json() -> Result<()> {
    let test = CliTest::with_file("index.html", "<p>Hello</p>")?;
    test.write_file("locales/en.json", r#"{ "8b1a9953": "Hello" }"#)?;
    test.write_file("locales/de.json", "{ broken")?;

    let output = test.run(&["localize"])?;
    assert_eq!(output.status.code(), Some(2));
    // The tail is serde_json's own message.
    assert!(stderr(&output).starts_with(
        "Error: Failed to load locale file: ./locales/de.json: invalid dictionary for locale 'de': "
    ));
    assert!(!test.root().join("de").exists());

    Ok(())
}
