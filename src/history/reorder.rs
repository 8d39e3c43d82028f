use crate::option::MenuOption;

/// Promote options whose `value` appears in `history`.
///
/// History is walked most-recent-first; every option matching an entry is
/// moved to the promoted block in its original relative order, so duplicate
/// values travel together. Unmatched options follow, order untouched.
pub fn reorder(options: Vec<MenuOption>, history: &[String]) -> Vec<MenuOption> {
    if history.is_empty() {
        return options;
    }

    let mut remaining: Vec<Option<MenuOption>> = options.into_iter().map(Some).collect();
    let mut promoted = Vec::with_capacity(remaining.len());

    for value in history {
        for slot in remaining.iter_mut() {
            if slot.as_ref().is_some_and(|o| &o.value == value) {
                promoted.extend(slot.take());
            }
        }
    }

    promoted.extend(remaining.into_iter().flatten());
    promoted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts(values: &[&str]) -> Vec<MenuOption> {
        values
            .iter()
            .map(|v| MenuOption::new(v.to_uppercase(), *v).with_cmds(["run"]))
            .collect()
    }

    fn values(options: &[MenuOption]) -> Vec<&str> {
        options.iter().map(|o| o.value.as_str()).collect()
    }

    fn history(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_reorder_single_entry() {
        let result = reorder(opts(&["a", "b", "c"]), &history(&["b"]));
        assert_eq!(values(&result), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_reorder_follows_recency() {
        let result = reorder(opts(&["a", "b", "c"]), &history(&["c", "a"]));
        assert_eq!(values(&result), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_reorder_empty_history_keeps_order() {
        let result = reorder(opts(&["c", "a", "b"]), &[]);
        assert_eq!(values(&result), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_reorder_ignores_unknown_history() {
        let result = reorder(opts(&["a", "b"]), &history(&["zzz", "b"]));
        assert_eq!(values(&result), vec!["b", "a"]);
    }

    #[test]
    fn test_reorder_promotes_duplicates_together() {
        let mut input = opts(&["a", "b", "c", "b"]);
        input[3].name = "second b".to_string();
        let result = reorder(input, &history(&["c", "b"]));

        assert_eq!(values(&result), vec!["c", "b", "b", "a"]);
        assert_eq!(result[1].name, "B");
        assert_eq!(result[2].name, "second b");
    }

    #[test]
    fn test_reorder_adjacent_duplicates_both_promoted() {
        let result = reorder(opts(&["x", "x", "y"]), &history(&["x"]));
        assert_eq!(values(&result), vec!["x", "x", "y"]);
        assert_eq!(result.len(), 3);
    }
}
