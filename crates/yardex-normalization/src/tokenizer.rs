//! Rule identifier tokenization.
//!
//! Splits identifiers such as `Trojan_APIHook_Win32` into lower-case name
//! tags (`trojan`, `api`, `hook`, `win32`) on underscores and camel-case
//! boundaries.

use std::sync::LazyLock;

use regex::Regex;

/// Leading capitals followed by a lower-case/digit run, or by end of input.
static CAMEL_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[A-Z]*(?:[^A-Z]+|$)").expect("Invalid camel-case regex"));

/// A leading acronym: two or more capitals or digits.
static ACRONYM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^[A-Z0-9]{2,}").expect("Invalid acronym regex"));

/// Split a rule identifier into lower-case tag tokens.
///
/// Never fails; an identifier with no usable words yields an empty list.
pub fn split_rule_name(name: &str) -> Vec<String> {
    let mut words: Vec<&str> = Vec::new();
    for section in name.split('_') {
        for word in CAMEL_WORD
            .find_iter(section)
            .map(|m| m.as_str())
            .filter(|word| !word.is_empty())
        {
            push_word(&mut words, word);
        }
    }
    merge_single_capitals(&words)
}

/// `APIServer` is split into `API` and `Server`: the last capital of an
/// acronym run belongs to the next word.
fn push_word<'a>(words: &mut Vec<&'a str>, word: &'a str) {
    match ACRONYM.find(word) {
        Some(run) if run.len() < word.len() => {
            let (head, tail) = word.split_at(run.len() - 1);
            words.push(head);
            words.push(tail);
        }
        _ => words.push(word),
    }
}

fn merge_single_capitals(words: &[&str]) -> Vec<String> {
    let mut tags = Vec::with_capacity(words.len());
    let mut index = 0;
    while index < words.len() {
        let word = words[index];
        if word.len() == 1
            && word.bytes().all(|b| b.is_ascii_uppercase())
            && let Some(next) = words.get(index + 1)
        {
            tags.push(format!("{word}{next}").to_lowercase());
            index += 2;
            continue;
        }
        if word.len() > 1 {
            tags.push(word.to_lowercase());
        }
        index += 1;
    }
    tags
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(name: &str) -> Vec<String> {
        split_rule_name(name)
    }

    #[test]
    fn acronym_followed_by_word() {
        assert_eq!(tokens("APIHandler"), ["api", "handler"]);
        assert_eq!(tokens("APIServer"), ["api", "server"]);
    }

    #[test]
    fn underscores_separate_sections() {
        assert_eq!(tokens("Trojan_Win32_Example"), ["trojan", "win32", "example"]);
        assert_eq!(tokens("Trojan_APIHook_Win32"), ["trojan", "api", "hook", "win32"]);
    }

    #[test]
    fn single_capital_joins_next_word() {
        assert_eq!(tokens("SBox"), ["sbox"]);
    }

    #[test]
    fn pure_acronym_is_kept() {
        assert_eq!(tokens("APT_RAT"), ["apt", "rat"]);
    }

    #[test]
    fn lower_camel_case() {
        assert_eq!(tokens("fooBarBaz"), ["foo", "bar", "baz"]);
    }

    #[test]
    fn stray_single_characters_are_dropped() {
        assert_eq!(tokens("x_Loader"), ["loader"]);
        assert_eq!(tokens("Loader_A"), ["loader"]);
    }

    #[test]
    fn single_capital_merges_across_sections() {
        assert_eq!(tokens("A_Loader"), ["aloader"]);
    }

    #[test]
    fn empty_and_separator_only_names() {
        assert!(tokens("").is_empty());
        assert!(tokens("___").is_empty());
    }
}
