/// Replace every non-overlapping occurrence of `pattern` in `subject`,
/// scanning left to right. The subject is never modified.
///
/// Two passes: the scan pass collects the byte offset of each match, the
/// build pass computes the exact output length from the match count and
/// fills a single allocation. This avoids rescanning after every
/// replacement and never over-allocates.
pub fn replace_all(subject: &str, pattern: &str, replacement: &str) -> String {
    // An empty pattern matches nothing.
    if pattern.is_empty() {
        return subject.to_owned();
    }

    let offsets: Vec<usize> = subject
        .match_indices(pattern)
        .map(|(offset, _)| offset)
        .collect();
    if offsets.is_empty() {
        return subject.to_owned();
    }

    let out_len =
        subject.len() - offsets.len() * pattern.len() + offsets.len() * replacement.len();
    let mut out = String::with_capacity(out_len);

    let mut tail = 0;
    for &offset in &offsets {
        out.push_str(&subject[tail..offset]);
        out.push_str(replacement);
        tail = offset + pattern.len();
    }
    out.push_str(&subject[tail..]);

    debug_assert_eq!(out.len(), out_len);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_occurrences_returns_the_subject() {
        let subject = "https://cdn.example.com/v1/key.bin";
        assert_eq!(replace_all(subject, "token=", "t="), subject);
    }

    #[test]
    fn replaces_every_occurrence_left_to_right() {
        assert_eq!(replace_all("a-b-c", "-", "--"), "a--b--c");
        assert_eq!(replace_all("ababab", "ab", "xyz"), "xyzxyzxyz");
    }

    #[test]
    fn empty_replacement_deletes_matches() {
        assert_eq!(replace_all("aXbXc", "X", ""), "abc");
    }

    #[test]
    fn matches_do_not_overlap() {
        assert_eq!(replace_all("aaaa", "aa", "b"), "bb");
        assert_eq!(replace_all("aaa", "aa", "b"), "ba");
    }

    #[test]
    fn empty_pattern_is_a_no_op() {
        assert_eq!(replace_all("abc", "", "x"), "abc");
    }

    #[test]
    fn rewriting_back_restores_the_subject() {
        let original = "https://keys.example.com/v1/k.bin?id=1";
        let rewritten = replace_all(original, "keys.example.com", "mirror.example.net");
        assert_eq!(rewritten, "https://mirror.example.net/v1/k.bin?id=1");
        assert_eq!(
            replace_all(&rewritten, "mirror.example.net", "keys.example.com"),
            original
        );
    }

    #[test]
    fn shrinking_replacement() {
        assert_eq!(replace_all("ababab", "ab", "x"), "xxx");
    }

    #[test]
    fn match_at_both_ends() {
        assert_eq!(replace_all("XmiddleX", "X", "yy"), "yymiddleyy");
    }
}
