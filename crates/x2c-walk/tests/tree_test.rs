use std::fs;
use std::path::Path;

use x2c_rewrite::RewriteEngine;
use x2c_walk::{ExcludeList, TreeWalker, WalkError, WalkOptions, restore_tree};

const LOGIN_TEST: &str = r#"<?php
class LoginTest extends PHPUnit_Extensions_SeleniumTestCase
{
    private $_submit = '//input[@type="submit"]';

    public function testLogin()
    {
        $this->type("//input[@id='user']", 'admin');
        $this->click($this->_submit);
        $this->assertEquals(1, $this->getXpathCount('//div[@class="welcome"]'));
    }
}
"#;

const PLAIN: &str = "<?php\necho 'nothing to see';\n";

fn walker(options: WalkOptions) -> TreeWalker {
    TreeWalker::new(RewriteEngine::default(), options)
}

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

#[test]
fn test_rewrite_tree() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write(root, "tests/LoginTest.php", LOGIN_TEST);
    write(root, "tests/Plain.php", PLAIN);
    write(root, "tests/notes.txt", "click('//a');");
    write(root, ".git/hooks/Hook.php", "click('//a');");

    let summary = walker(WalkOptions::default()).rewrite_tree(root).unwrap();

    assert_eq!(summary.files_matched, 2);
    assert_eq!(summary.files_changed, 1);
    // notes.txt is counted but not rewritten
    assert_eq!(summary.marker_count, 4);
    assert_eq!(summary.replaced, 2);
    assert_eq!(summary.skipped, 1);

    let rewritten = fs::read_to_string(root.join("tests/LoginTest.php")).unwrap();
    assert!(rewritten.contains("private $_submit = 'css=input[type=submit]';"));
    assert!(rewritten.contains(r#"$this->type("css=input#user", 'admin');"#));
    assert!(rewritten.contains(r#"getXpathCount('//div[@class="welcome"]')"#));

    // Backup only for the file that changed
    assert_eq!(
        fs::read_to_string(root.join("tests/LoginTest.php.bak")).unwrap(),
        LOGIN_TEST
    );
    assert!(!root.join("tests/Plain.php.bak").exists());

    // Hidden directories and other extensions are untouched
    assert_eq!(
        fs::read_to_string(root.join(".git/hooks/Hook.php")).unwrap(),
        "click('//a');"
    );
    assert_eq!(
        fs::read_to_string(root.join("tests/notes.txt")).unwrap(),
        "click('//a');"
    );
}

#[test]
fn test_rewrite_single_file_without_backup() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("LoginTest.php");
    fs::write(&file, LOGIN_TEST).unwrap();

    let options = WalkOptions {
        backup: false,
        ..Default::default()
    };
    let summary = walker(options).rewrite_tree(&file).unwrap();

    assert_eq!(summary.files_matched, 1);
    assert_eq!(summary.replaced, 2);
    assert!(!dir.path().join("LoginTest.php.bak").exists());
}

#[test]
fn test_second_run_changes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("LoginTest.php");
    fs::write(&file, LOGIN_TEST).unwrap();

    let walker = walker(WalkOptions::default());
    walker.rewrite_tree(dir.path()).unwrap();
    let first = fs::read_to_string(&file).unwrap();

    let (outcome, written) = walker.rewrite_file(&file).unwrap();
    assert!(!written);
    assert_eq!(outcome.accepted, 0);
    assert_eq!(fs::read_to_string(&file).unwrap(), first);
}

#[test]
fn test_count_does_not_mutate() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    let content = "<?php\n$a = '//a';\nfind(\"xpath=//b\");\ngetXpathCount('//c');\n";
    write(root, "Count.php", content);

    let count = walker(WalkOptions::default()).count(root).unwrap();

    assert_eq!(count, 3);
    assert_eq!(fs::read_to_string(root.join("Count.php")).unwrap(), content);
    assert!(!root.join("Count.php.bak").exists());
}

#[test]
fn test_count_spans_all_extensions() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write(root, "a.php", "click('//a');");
    write(root, "b.js", "find('//b'); find(\"xpath=//c\");");
    fs::write(root.join("blob.bin"), [0xff, 0xfe, 0x27, 0x2f, 0x2f]).unwrap();

    let walker = walker(WalkOptions::default());
    assert_eq!(walker.count(root).unwrap(), 3);

    let summary = walker.rewrite_tree(root).unwrap();
    assert_eq!(summary.marker_count, 3);
    assert_eq!(summary.files_matched, 1);
    assert_eq!(summary.replaced, 1);
    assert_eq!(
        fs::read_to_string(root.join("b.js")).unwrap(),
        "find('//b'); find(\"xpath=//c\");"
    );
}

#[test]
fn test_restore() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write(root, "a.php.bak", "original");
    write(root, "b.txt", "text");
    write(root, "sub/c.php.bak", "nested");

    let restored = restore_tree(root, &WalkOptions::default()).unwrap();

    assert_eq!(restored.len(), 2);
    assert_eq!(fs::read_to_string(root.join("a.php")).unwrap(), "original");
    assert_eq!(fs::read_to_string(root.join("sub/c.php")).unwrap(), "nested");
    assert!(!root.join("a.php.bak").exists());
    assert_eq!(fs::read_to_string(root.join("b.txt")).unwrap(), "text");
}

#[test]
fn test_rewrite_then_restore_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("LoginTest.php");
    fs::write(&file, LOGIN_TEST).unwrap();

    let options = WalkOptions::default();
    walker(options.clone()).rewrite_tree(dir.path()).unwrap();
    assert_ne!(fs::read_to_string(&file).unwrap(), LOGIN_TEST);

    restore_tree(dir.path(), &options).unwrap();
    assert_eq!(fs::read_to_string(&file).unwrap(), LOGIN_TEST);
}

#[test]
fn test_exclude_patterns() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write(root, "vendor/lib/Lib.php", "click('//a');");
    write(root, "tests/Page.php", "click('//a');");

    let options = WalkOptions {
        exclude: ExcludeList::new(&["**/vendor/**".to_string()]),
        ..Default::default()
    };
    let summary = walker(options).rewrite_tree(root).unwrap();

    assert_eq!(summary.files_matched, 1);
    assert_eq!(
        fs::read_to_string(root.join("vendor/lib/Lib.php")).unwrap(),
        "click('//a');"
    );
    assert_eq!(
        fs::read_to_string(root.join("tests/Page.php")).unwrap(),
        "click('css=a');"
    );
}

#[test]
fn test_custom_extension() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write(root, "page.inc", "click('//a');");
    write(root, "page.php", "click('//a');");

    let options = WalkOptions {
        extension: "inc".to_string(),
        ..Default::default()
    };
    let summary = walker(options).rewrite_tree(root).unwrap();

    assert_eq!(summary.files_matched, 1);
    assert!(root.join("page.inc.bak").exists());
    assert_eq!(fs::read_to_string(root.join("page.php")).unwrap(), "click('//a');");
}

#[test]
fn test_missing_path() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope");

    let err = walker(WalkOptions::default())
        .rewrite_tree(&missing)
        .unwrap_err();
    assert!(matches!(err, WalkError::NotFound(_)));
}
