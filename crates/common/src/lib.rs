pub mod types;
pub mod utils;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_type_ok() {
        let h = types::Health::ok();
        assert_eq!(h.status, "ok");
    }

    #[test]
    fn counted_tracks_result_length() {
        let c = types::Counted::new(vec!["a", "b", "c"]);
        assert_eq!(c.count, 3);
        assert_eq!(c.results.len(), 3);

        let empty: types::Counted<u8> = types::Counted::new(Vec::new());
        assert_eq!(empty.count, 0);
    }
}
