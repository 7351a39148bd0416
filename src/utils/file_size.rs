pub struct FileSizeUtils;

impl FileSizeUtils {
    const KIB: u64 = 1024;
    const MIB: u64 = 1024 * 1024;

    /// Formats a byte count the way the file list shows it: whole bytes below
    /// one kibibyte, otherwise KB or MB with a single decimal.
    pub fn format_size(size: u64) -> String {
        if size < Self::KIB {
            format!("{} bytes", size)
        } else if size < Self::MIB {
            format!("{:.1} KB", size as f64 / Self::KIB as f64)
        } else {
            format!("{:.1} MB", size as f64 / Self::MIB as f64)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::FileSizeUtils;

    #[test]
    fn small_sizes_are_plain_bytes() {
        assert_eq!(FileSizeUtils::format_size(0), "0 bytes");
        assert_eq!(FileSizeUtils::format_size(1023), "1023 bytes");
    }

    #[test]
    fn kibibytes_use_one_decimal() {
        assert_eq!(FileSizeUtils::format_size(1024), "1.0 KB");
        assert_eq!(FileSizeUtils::format_size(1536), "1.5 KB");
    }

    #[test]
    fn mebibytes_use_one_decimal() {
        assert_eq!(FileSizeUtils::format_size(1_572_864), "1.5 MB");
        assert_eq!(FileSizeUtils::format_size(5 * 1024 * 1024), "5.0 MB");
    }

    #[test]
    fn gigabyte_inputs_stay_in_megabytes() {
        assert_eq!(FileSizeUtils::format_size(2 * 1024 * 1024 * 1024), "2048.0 MB");
    }
}
