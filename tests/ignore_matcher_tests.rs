//! Gitignore matching semantics of PatternMatcher

use proptest::prelude::*;
use rstest::rstest;
use vrepo::PatternMatcher;

#[rstest]
#[case::extension(&["*.log"], "debug.log", true)]
#[case::extension_nested(&["*.log"], "logs/app/debug.log", true)]
#[case::negation_reincludes(&["*.log", "!keep.log"], "keep.log", false)]
#[case::negation_nested(&["*.txt", "!important.txt"], "docs/important.txt", false)]
#[case::negation_order_matters(&["!keep.log", "*.log"], "keep.log", true)]
#[case::dir_only_on_directory(&["build/"], "build/", true)]
#[case::dir_only_on_file(&["build/"], "build", false)]
#[case::dir_only_inherited(&["build/"], "src/build/out.o", true)]
#[case::anchored_root_only(&["/build"], "src/build", false)]
#[case::anchored_contents(&["/build"], "build/x", true)]
#[case::interior_slash_anchors(&["doc/frotz"], "a/doc/frotz", false)]
#[case::interior_slash_root(&["doc/frotz"], "doc/frotz", true)]
#[case::leading_double_star(&["**/foo"], "a/b/foo", true)]
#[case::middle_double_star(&["a/**/b"], "a/x/y/b", true)]
#[case::middle_double_star_zero(&["a/**/b"], "a/b", true)]
#[case::trailing_double_star_contents(&["abc/**"], "abc/def/ghi", true)]
#[case::trailing_double_star_self(&["abc/**"], "abc/", false)]
#[case::excluded_parent_wins(&["node_modules/", "!node_modules/keep.js"], "node_modules/keep.js", true)]
#[case::comment_line(&["#comment", ""], "#comment", false)]
#[case::escaped_hash(&["\\#literal"], "#literal", true)]
#[case::question_mark(&["foo?"], "fooX", true)]
#[case::question_mark_needs_char(&["foo?"], "foo", false)]
#[case::character_class(&["[abc].txt"], "b.txt", true)]
#[case::character_class_miss(&["[abc].txt"], "d.txt", false)]
#[case::escaped_star(&["foo\\*"], "foo*", true)]
#[case::escaped_star_is_literal(&["foo\\*"], "foobar", false)]
#[case::caret_class_negation(&["[^a].txt"], "b.txt", true)]
#[case::caret_class_negation_miss(&["[^a].txt"], "a.txt", false)]
#[case::malformed_class(&["data[0"], "x/data[0].bin", true)]
#[case::outside_root(&["*.log"], "../debug.log", false)]
#[case::dot_prefix(&["dist"], "./dist/bundle.js", true)]
#[case::star_stays_in_segment(&["/src/*.rs"], "src/bin/main.rs", false)]
fn test_pattern_semantics(#[case] patterns: &[&str], #[case] path: &str, #[case] expected: bool) {
    let matcher = PatternMatcher::build(patterns.iter().copied());
    assert_eq!(
        matcher.is_ignored(path),
        expected,
        "patterns {:?} on {:?}",
        patterns,
        path
    );
}

#[test]
fn test_explicit_directory_flag() {
    let matcher = PatternMatcher::from_gitignore("cache/\n");

    assert!(matcher.is_ignored_entry("cache", true));
    assert!(!matcher.is_ignored_entry("cache", false));
    assert!(matcher.is_ignored_entry("cache/file", false));
}

#[test]
fn test_gitignore_with_crlf_and_comments() {
    let matcher = PatternMatcher::from_gitignore("# build output\r\n/target\r\n\r\n*.swp\r\n");

    assert_eq!(matcher.patterns().len(), 2);
    assert!(matcher.is_ignored("target/debug/vrepo"));
    assert!(matcher.is_ignored("src/.main.rs.swp"));
    assert!(!matcher.is_ignored("src/target.rs"));
}

fn segment() -> impl Strategy<Value = String> {
    "[a-z]{1,8}"
}

fn pattern_line() -> impl Strategy<Value = String> {
    "!?/?(\\*\\*/)?[a-c*?]{1,3}(\\.(log|txt))?(/\\*\\*)?/?"
}

fn sample_path() -> impl Strategy<Value = String> {
    "[a-c]{1,3}(/[a-c]{1,3}){0,3}(\\.(log|txt))?/?"
}

proptest! {
    #[test]
    fn prop_excluded_directory_dominates(dir in segment(), child in segment()) {
        let matcher = PatternMatcher::build([format!("{}/", dir), format!("!{}/{}", dir, child)]);
        let child_path = format!("{}/{}", dir, child);
        let deeper_path = format!("{}/{}/deeper.txt", dir, child);
        prop_assert!(matcher.is_ignored(&child_path));
        prop_assert!(matcher.is_ignored(&deeper_path));
    }

    #[test]
    fn prop_equivalent_spellings_agree(parts in prop::collection::vec(segment(), 1..5), ext in "(log|txt|rs)") {
        let matcher = PatternMatcher::build(["*.log", "!keep*.log", "/tmp/", "cache/**"]);
        let path = format!("{}.{}", parts.join("/"), ext);
        let expected = matcher.is_ignored(&path);

        prop_assert_eq!(matcher.is_ignored(&format!("./{}", path)), expected);
        prop_assert_eq!(matcher.is_ignored(&format!("/{}", path)), expected);
        prop_assert_eq!(matcher.is_ignored(&format!("x/../{}", path)), expected);
        prop_assert_eq!(matcher.is_ignored(&path.replace('/', "\\")), expected);
    }

    #[test]
    fn prop_comments_and_blank_lines_are_inert(parts in prop::collection::vec(segment(), 1..4)) {
        let plain = PatternMatcher::from_gitignore("*.o\nbuild/\n");
        let noisy = PatternMatcher::from_gitignore("# objects\n\n*.o\n   \n# dirs\nbuild/\n");
        let path = parts.join("/");

        prop_assert_eq!(plain.is_ignored(&path), noisy.is_ignored(&path));
        prop_assert_eq!(plain.is_ignored(&format!("{}.o", path)), noisy.is_ignored(&format!("{}.o", path)));
    }

    #[test]
    fn prop_identical_text_gives_identical_answers(
        lines in prop::collection::vec(pattern_line(), 0..8),
        paths in prop::collection::vec(sample_path(), 1..16),
    ) {
        let text = lines.join("\n");
        let first = PatternMatcher::from_gitignore(&text);
        let second = PatternMatcher::from_gitignore(&text);

        for path in &paths {
            let answer = first.is_ignored(path);
            prop_assert_eq!(second.is_ignored(path), answer, "path {:?} with {:?}", path, text);
            prop_assert_eq!(first.is_ignored(path), answer, "repeated query on {:?}", path);
        }
    }
}
