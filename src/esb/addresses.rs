/// Address table programmed into the radio before a run
///
/// Pipe 0 uses `base_addr_0`, pipes 1 through 7 share `base_addr_1`, and each
/// pipe gets one byte from `prefixes`. Both ends of a link must be programmed
/// with the same table.
#[derive(Debug, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Addresses {
    /// Base address of pipe 0
    pub base_addr_0: [u8; 4],
    /// Base address of pipes 1 through 7
    pub base_addr_1: [u8; 4],
    /// Address prefix byte of each pipe
    pub prefixes: [u8; 8],
}

impl Default for Addresses {
    /// The well-known test address table
    ///
    /// End user products should assign a distinct table to each set of
    /// devices.
    fn default() -> Self {
        Self {
            base_addr_0: [0xE7, 0xE7, 0xE7, 0xE7],
            base_addr_1: [0xC2, 0xC2, 0xC2, 0xC2],
            prefixes: [0xE7, 0xC2, 0xC3, 0xC4, 0xC5, 0xC6, 0xC7, 0xC8],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_assigns_distinct_prefixes() {
        let addresses = Addresses::default();

        for (i, prefix) in addresses.prefixes.iter().enumerate() {
            for other in addresses.prefixes.iter().skip(i + 1) {
                assert_ne!(prefix, other);
            }
        }
    }
}
