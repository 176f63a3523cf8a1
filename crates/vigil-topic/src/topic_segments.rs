/// Delimiter separating topic segments unless configured otherwise.
pub const DEFAULT_TOPIC_DELIMITER: &str = " | ";

/// Splits a raw topic string into its ordered segments.
///
/// Splitting the empty string yields one empty segment, so a topic without
/// delimiters always has exactly one segment and no annotations.
pub fn split_topic(topic: &str, delimiter: &str) -> Vec<String> {
    topic.split(delimiter).map(str::to_string).collect()
}

/// Joins segments back into a raw topic string.
///
/// Exact inverse of [`split_topic`] when no segment contains the delimiter.
pub fn join_topic(segments: &[String], delimiter: &str) -> String {
    segments.join(delimiter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_split_join_round_trip() {
        let cases: Vec<Vec<String>> = vec![
            vec![String::new()],
            vec!["Status".to_string()],
            vec!["Status".to_string(), "eventA".to_string()],
            vec![
                "Status".to_string(),
                "eventA".to_string(),
                "eventB".to_string(),
            ],
            vec!["a|b".to_string(), "c".to_string()],
        ];
        for segments in cases {
            let joined = join_topic(&segments, DEFAULT_TOPIC_DELIMITER);
            assert_eq!(split_topic(&joined, DEFAULT_TOPIC_DELIMITER), segments);
        }
    }

    #[test]
    fn unit_split_without_delimiter_yields_single_segment() {
        assert_eq!(
            split_topic("Status", DEFAULT_TOPIC_DELIMITER),
            vec!["Status".to_string()]
        );
        assert_eq!(
            split_topic("", DEFAULT_TOPIC_DELIMITER),
            vec![String::new()]
        );
    }

    #[test]
    fn unit_split_respects_custom_delimiter() {
        assert_eq!(
            split_topic("a :: b :: c", " :: "),
            vec!["a".to_string(), "b".to_string(), "c".to_string()]
        );
    }
}
