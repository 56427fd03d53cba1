//! Integration tests for the handlebars-rev binary.

use std::fs;
use std::path::Path;

use assert_cmd::cargo;
use predicates::prelude::*;
use tempfile::TempDir;

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// A project with `index.hbs`, `data.json` and an empty `partials/`.
fn project(main: &str, data: &str) -> TempDir {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "index.hbs", main);
    write(temp.path(), "data.json", data);
    fs::create_dir_all(temp.path().join("partials")).unwrap();
    temp
}

fn render_cmd(temp: &TempDir) -> assert_cmd::Command {
    let mut cmd = cargo::cargo_bin_cmd!("handlebars-rev");
    cmd.current_dir(temp.path())
        .env_remove("RUST_LOG")
        .args(["-m", "index.hbs", "-d", "data.json", "-o", "out.html"]);
    cmd
}

fn stderr_of(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn help_flag_lists_options_on_stdout() {
    cargo::cargo_bin_cmd!("handlebars-rev")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--main"))
        .stdout(predicate::str::contains("--partials"))
        .stdout(predicate::str::contains("--data"))
        .stdout(predicate::str::contains("--output"));
}

#[test]
fn version_flag() {
    cargo::cargo_bin_cmd!("handlebars-rev")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn renders_variables_into_output_file() {
    let temp = project("Hello {{name}}", r#"{"name": "World"}"#);

    render_cmd(&temp)
        .assert()
        .success()
        .stdout(predicate::str::contains("out.html"));

    assert_eq!(
        fs::read_to_string(temp.path().join("out.html")).unwrap(),
        "Hello World"
    );
}

#[test]
fn partials_are_registered_by_file_stem() {
    let temp = project("{{> a}}{{> b}}{{> c}}", "{}");
    write(temp.path(), "partials/a.hbs", "A");
    write(temp.path(), "partials/b.txt", "B");
    write(temp.path(), "partials/nested/c.foo.hbs", "C");

    render_cmd(&temp).assert().success();

    assert_eq!(
        fs::read_to_string(temp.path().join("out.html")).unwrap(),
        "ABC"
    );
}

#[test]
fn partials_option_selects_directory() {
    let temp = project("<p>{{> greeting}}</p>", "{}");
    write(temp.path(), "src/parts/greeting.hbs", "Hi!");

    render_cmd(&temp)
        .args(["-p", "src/parts"])
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(temp.path().join("out.html")).unwrap(),
        "<p>Hi!</p>"
    );
}

#[test]
fn empty_partials_directory_warns_exactly_once() {
    let temp = project("plain text", "{}");

    let assert = render_cmd(&temp).assert().success();

    let stderr = stderr_of(assert.get_output());
    assert_eq!(stderr.matches("Did not find any files").count(), 1);
    assert!(stderr.contains("partials"));
    assert_eq!(
        fs::read_to_string(temp.path().join("out.html")).unwrap(),
        "plain text"
    );
}

#[test]
fn empty_partials_warning_precedes_render_failure() {
    let temp = project("{{> nav}}", "{}");

    let assert = render_cmd(&temp).assert().code(2);

    let stderr = stderr_of(assert.get_output());
    assert_eq!(stderr.matches("Did not find any files").count(), 1);
    let warning = stderr.find("Did not find any files").unwrap();
    let error = stderr.find("nav").unwrap();
    assert!(warning < error);
    assert!(!temp.path().join("out.html").exists());
}

#[test]
fn literal_template_is_copied_verbatim() {
    let literal = "<html>\n  <body>  no tags  </body>\n</html>\n";
    let temp = project(literal, r#"[1, "two", null]"#);

    render_cmd(&temp).assert().success();

    assert_eq!(fs::read_to_string(temp.path().join("out.html")).unwrap(), literal);
}

#[test]
fn missing_main_alone_warns_once_and_touches_nothing() {
    let temp = project("x", "{}");

    let assert = cargo::cargo_bin_cmd!("handlebars-rev")
        .current_dir(temp.path())
        .args(["-d", "data.json", "-o", "out.html"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("Usage"));

    let stderr = stderr_of(assert.get_output());
    assert_eq!(stderr.matches("parameter is required.").count(), 1);
    assert!(stderr.contains("-m or --main parameter is required."));
    assert!(!temp.path().join("out.html").exists());
}

#[test]
fn every_missing_option_is_reported() {
    let temp = TempDir::new().unwrap();

    let assert = cargo::cargo_bin_cmd!("handlebars-rev")
        .current_dir(temp.path())
        .assert()
        .code(2);

    let stderr = stderr_of(assert.get_output());
    assert!(stderr.contains("-m or --main parameter is required."));
    assert!(stderr.contains("-d or --data parameter is required."));
    assert!(stderr.contains("-o or --output parameter is required."));
}

#[test]
fn invalid_json_fails_without_output() {
    let temp = project("Hello {{name}}", r#"{"name": "World",}"#);

    render_cmd(&temp)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid JSON"))
        .stderr(predicate::str::contains("data.json"));

    assert!(!temp.path().join("out.html").exists());
}

#[test]
fn invalid_json_leaves_existing_output_untouched() {
    let temp = project("Hello {{name}}", "not json");
    write(temp.path(), "out.html", "previous");

    render_cmd(&temp).assert().failure();

    assert_eq!(
        fs::read_to_string(temp.path().join("out.html")).unwrap(),
        "previous"
    );
}

#[test]
fn missing_main_template_is_not_found() {
    let temp = project("unused", "{}");
    fs::remove_file(temp.path().join("index.hbs")).unwrap();

    render_cmd(&temp)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("index.hbs"));

    assert!(!temp.path().join("out.html").exists());
}

#[test]
fn missing_partials_directory_is_not_found() {
    let temp = project("x", "{}");
    fs::remove_dir(temp.path().join("partials")).unwrap();

    render_cmd(&temp).assert().code(3);
}

#[test]
fn unknown_partial_is_a_template_error() {
    let temp = project("{{> nav}}", "{}");

    render_cmd(&temp)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("nav"))
        .stderr(predicate::str::contains("index.hbs"))
        .stderr(predicate::str::contains("\"/main\"").not());

    assert!(!temp.path().join("out.html").exists());
}

#[test]
fn unused_broken_partial_does_not_fail_the_render() {
    let temp = project("Hello", "{}");
    write(temp.path(), "partials/broken.hbs", "{{#each x}}");

    render_cmd(&temp).assert().success();
    assert_eq!(
        fs::read_to_string(temp.path().join("out.html")).unwrap(),
        "Hello"
    );

    write(temp.path(), "index.hbs", "Hello {{> broken}}");
    fs::remove_file(temp.path().join("out.html")).unwrap();
    render_cmd(&temp)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("broken"));
    assert!(!temp.path().join("out.html").exists());
}

#[test]
fn partials_path_naming_a_file_finds_no_partials() {
    let temp = project("plain", "{}");
    write(temp.path(), "single.hbs", "not a folder");

    let assert = render_cmd(&temp)
        .args(["-p", "single.hbs"])
        .assert()
        .success();

    assert!(stderr_of(assert.get_output()).contains("Did not find any files"));
    assert_eq!(
        fs::read_to_string(temp.path().join("out.html")).unwrap(),
        "plain"
    );
}

#[test]
fn template_syntax_error_is_reported() {
    let temp = project("{{#if open}}never closed", "{}");

    render_cmd(&temp)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("index.hbs"));
}

#[test]
fn repeat_helper_renders_block_n_times() {
    let temp = project(
        "{{#repeat n}}<li>{{@index}}</li>{{/repeat}}",
        r#"{"n": 3}"#,
    );

    render_cmd(&temp).assert().success();

    assert_eq!(
        fs::read_to_string(temp.path().join("out.html")).unwrap(),
        "<li>0</li><li>1</li><li>2</li>"
    );
}

#[test]
fn strict_flag_rejects_missing_values() {
    let temp = project("Hello {{nobody}}", "{}");

    render_cmd(&temp).assert().success();
    assert_eq!(
        fs::read_to_string(temp.path().join("out.html")).unwrap(),
        "Hello "
    );

    fs::remove_file(temp.path().join("out.html")).unwrap();
    render_cmd(&temp).arg("--strict").assert().code(2);
    assert!(!temp.path().join("out.html").exists());
}

#[test]
fn no_escape_flag_emits_raw_html() {
    let temp = project("{{html}}", r#"{"html": "<b>&</b>"}"#);

    render_cmd(&temp).assert().success();
    assert_eq!(
        fs::read_to_string(temp.path().join("out.html")).unwrap(),
        "&lt;b&gt;&amp;&lt;/b&gt;"
    );

    render_cmd(&temp).arg("--no-escape").assert().success();
    assert_eq!(
        fs::read_to_string(temp.path().join("out.html")).unwrap(),
        "<b>&</b>"
    );
}

#[test]
fn config_file_supplies_partials_dir_and_strictness() {
    let temp = project("{{> card}}{{missing}}", "{}");
    write(temp.path(), "src/partials/card.hbs", "CARD");
    write(
        temp.path(),
        "hbrev.toml",
        "[render]\npartials_dir = \"src/partials\"\n",
    );

    render_cmd(&temp)
        .args(["-c", "hbrev.toml"])
        .assert()
        .success();
    assert_eq!(
        fs::read_to_string(temp.path().join("out.html")).unwrap(),
        "CARD"
    );

    write(
        temp.path(),
        "strict.toml",
        "[render]\npartials_dir = \"src/partials\"\nstrict = true\n",
    );
    render_cmd(&temp)
        .args(["--config", "strict.toml"])
        .assert()
        .code(2);
}

#[test]
fn missing_config_file_exits_four() {
    let temp = project("x", "{}");

    render_cmd(&temp)
        .args(["-c", "absent.toml"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("absent.toml"));

    assert!(!temp.path().join("out.html").exists());
}

#[test]
fn no_color_env_accepts_any_value() {
    let temp = project("Hello {{name}}", r#"{"name": "World"}"#);

    for value in ["1", "yes", "true"] {
        let assert = render_cmd(&temp)
            .env("NO_COLOR", value)
            .args(["--output-format", "human"])
            .assert()
            .success();

        let output = assert.get_output();
        assert!(!stderr_of(output).contains('\u{1b}'), "NO_COLOR={value}");
        assert!(!String::from_utf8_lossy(&output.stdout).contains('\u{1b}'));
    }

    assert_eq!(
        fs::read_to_string(temp.path().join("out.html")).unwrap(),
        "Hello World"
    );
}

#[test]
fn quiet_suppresses_success_line() {
    let temp = project("x", "{}");

    render_cmd(&temp)
        .arg("--quiet")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}
