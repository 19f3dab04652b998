/// Normalizes a license plate to its canonical stored form: trimmed and
/// uppercased. An empty result means the input was blank.
pub fn normalize_plate(plate: &str) -> String {
    plate.trim().to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_plate_trims_and_uppercases() {
        assert_eq!(normalize_plate("  abc-1234  "), "ABC-1234");
        assert_eq!(normalize_plate("xyz9z99"), "XYZ9Z99");
        assert_eq!(normalize_plate("ABC-1234"), "ABC-1234");
    }

    #[test]
    fn test_normalize_plate_blank_inputs() {
        assert_eq!(normalize_plate(""), "");
        assert_eq!(normalize_plate("   "), "");
        assert_eq!(normalize_plate("\t\n"), "");
    }
}
