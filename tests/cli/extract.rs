use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;
use pretty_assertions::assert_eq;

use crate::CliTest;

#[test]
fn test_extract_content_and_attributes() -> Result<()> {
    let test = CliTest::with_file(
        "index.html",
        r#"<html>
  <head><title>Welcome</title></head>
  <body>
    <h1>Hello</h1>
    <img src="a.png" alt="contents of alt attribute">
    <div localize>Submit</div>
    <div>not translatable</div>
  </body>
</html>
"#,
    )?;

    assert_cmd_snapshot!(test.command().arg("extract"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Extracted 4 strings from 1 document into ./locales/en.json

    ----- stderr -----
    ");

    assert_eq!(
        test.read_file("locales/en.json")?,
        r#"{
  "8b1a9953": "Hello",
  "a4d3b161": "Submit",
  "83218ac3": "Welcome",
  "6cf62aab": "contents of alt attribute"
}
"#
    );

    Ok(())
}

#[test]
fn test_extract_deduplicates_across_documents() -> Result<()> {
    let test = CliTest::with_file("index.html", "<p>Hello</p>")?;
    test.write_file("docs/about.html", "<h2>Hello</h2><p>About us</p>")?;

    assert_cmd_snapshot!(test.command().arg("extract"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Extracted 2 strings from 2 documents into ./locales/en.json

    ----- stderr -----
    ");

    assert_eq!(
        test.read_file("locales/en.json")?,
        "{\n  \"cf23ee27\": \"About us\",\n  \"8b1a9953\": \"Hello\"\n}\n"
    );

    Ok(())
}

#[test]
fn test_extract_nothing_found() -> Result<()> {
    let test = CliTest::with_file("index.html", "<div>plain</div>")?;

    assert_cmd_snapshot!(test.command().arg("extract"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    warning: No translatable content found in 1 document

    ----- stderr -----
    ");
    assert!(!test.root().join("locales").exists());

    Ok(())
}

#[test]
fn test_extract_native_locale_override() -> Result<()> {
    let test = CliTest::with_file("index.html", "<p>Hello</p>")?;

    assert_cmd_snapshot!(
        test.command()
            .args(["extract", "--native-locale", "fr", "--locales-dir", "i18n"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Extracted 1 string from 1 document into ./i18n/fr.json

    ----- stderr -----
    "
    );
    assert!(test.root().join("i18n/fr.json").exists());

    Ok(())
}

#[test]
fn test_extract_uses_config_file() -> Result<()> {
    let test = CliTest::with_file("index.html", "<p>Hello</p>")?;
    test.write_file(
        ".l10nrc.json",
        r#"{ "hashAlgorithm": "sha256", "hashLength": 12 }"#,
    )?;

    assert_cmd_snapshot!(test.command().arg("extract"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Extracted 1 string from 1 document into ./locales/en.json

    ----- stderr -----
    ");
    assert_eq!(
        test.read_file("locales/en.json")?,
        "{\n  \"185f8db32271\": \"Hello\"\n}\n"
    );

    Ok(())
}

#[test]
fn test_extract_invalid_config() -> Result<()> {
    let test = CliTest::with_file("index.html", "<p>Hello</p>")?;
    test.write_file(".l10nrc.json", r#"{ "hashLength": 0 }"#)?;

    assert_cmd_snapshot!(test.command().arg("extract"), @r"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    Error: invalid configuration: hash length 0 out of range for md5 (1..=32)
    ");

    Ok(())
}

#[test]
fn test_extract_parse_error() -> Result<()> {
    let test = CliTest::with_file("index.html", "<p title=\"oops>Hello</p>")?;

    assert_cmd_snapshot!(test.command().arg("extract"), @r"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    Error: Failed to parse document: ./index.html: parse error at byte 0: unterminated value for attribute 'title'
    ");
    assert!(!test.root().join("locales").exists());

    Ok(())
}
