/// `part / total` as a whole percentage, rounded half up; 0 when `total` is 0.
#[must_use]
pub fn percent(part: usize, total: usize) -> usize {
    if total == 0 {
        return 0;
    }
    (part * 100 + total / 2) / total
}

#[cfg(test)]
mod tests {
    use super::percent;

    #[test]
    fn zero_total_is_guarded() {
        assert_eq!(percent(0, 0), 0);
    }

    #[test]
    fn rounds_half_up() {
        assert_eq!(percent(1, 3), 33);
        assert_eq!(percent(2, 3), 67);
        assert_eq!(percent(1, 8), 13);
        assert_eq!(percent(3, 3), 100);
    }
}
