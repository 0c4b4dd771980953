/// Query string of `GET /stat`.
///
/// `time` stays a raw string so a non-integer value can be answered with
/// the gateway's own error body. When the key repeats, the first value wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatQuery {
    pub time: Option<String>,
}

impl StatQuery {
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let time = pairs
            .into_iter()
            .find(|(key, _)| key == "time")
            .map(|(_, value)| value);
        Self { time }
    }
}
