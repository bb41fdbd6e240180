#![allow(dead_code)]

pub mod command;
pub mod file;

// Helper function to create hexdump representation
pub fn to_hexdump(data: &[u8]) -> String {
    let mut result = String::new();
    for (i, chunk) in data.chunks(16).enumerate() {
        result.push_str(&format!("{:08x}: ", i * 16));

        for (j, byte) in chunk.iter().enumerate() {
            if j == 8 {
                result.push(' ');
            }
            result.push_str(&format!("{:02x} ", byte));
        }

        // Pad if less than 16 bytes
        for j in chunk.len()..16 {
            if j == 8 {
                result.push(' ');
            }
            result.push_str("   ");
        }

        result.push_str(" |");
        for byte in chunk {
            if byte.is_ascii_graphic() {
                result.push(*byte as char);
            } else {
                result.push('.');
            }
        }
        result.push_str("|\n");
    }
    result
}

// Macro to compare index contents with hexdump output on failure
#[macro_export]
macro_rules! assert_index_eq {
    ($xg_content:expr, $git_content:expr) => {
        if $xg_content != $git_content {
            let xg_hexdump = common::to_hexdump($xg_content);
            let git_hexdump = common::to_hexdump($git_content);

            pretty_assertions::assert_eq!(
                xg_hexdump,
                git_hexdump,
                "\n=== INDEX CONTENTS DIFFER ===\nxg index ({} bytes) vs git index ({} bytes)",
                $xg_content.len(),
                $git_content.len()
            );
        }
    };
}
