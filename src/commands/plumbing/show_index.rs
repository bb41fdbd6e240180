use crate::areas::repository::Repository;
use crate::artifacts::index::index_entry::IndexEntry;
use colored::Colorize;
use std::io::Write;

const LABEL_WIDTH: usize = 16;

impl Repository {
    /// Pretty-print the decoded index
    pub fn show_index(&self, verbose: bool) -> anyhow::Result<()> {
        let mut index = self.index();
        index.rehydrate()?;

        writeln!(
            self.writer(),
            "{} {}, {} {}",
            "version".bold(),
            index.version(),
            "entries".bold(),
            index.len()
        )?;

        for entry in index.entries() {
            self.show_entry(entry, verbose)?;
        }

        if verbose {
            self.show_field("extensions", format!("{} bytes", index.extensions().len()))?;
            self.show_field("checksum", index.checksum().to_string())?;
        }

        Ok(())
    }

    fn show_entry(&self, entry: &IndexEntry, verbose: bool) -> anyhow::Result<()> {
        let metadata = &entry.metadata;

        writeln!(self.writer(), "{}", entry.name.yellow())?;
        self.show_field("ctime", format_time(metadata.ctime, metadata.ctime_nsec))?;
        self.show_field("mtime", format_time(metadata.mtime, metadata.mtime_nsec))?;
        self.show_field("oid", entry.oid.to_string())?;

        if !verbose {
            return Ok(());
        }

        self.show_field("dev", metadata.dev.to_string())?;
        self.show_field("ino", metadata.ino.to_string())?;
        self.show_field("mode", format!("{:o}", metadata.mode))?;
        self.show_field("uid", metadata.uid.to_string())?;
        self.show_field("gid", metadata.gid.to_string())?;
        self.show_field("size", metadata.size.to_string())?;
        self.show_field(
            "flags",
            format!(
                "assume_valid={} extended={} stage={} name_length={}",
                entry.flags.assume_valid,
                entry.flags.extended,
                entry.flags.stage,
                entry.flags.name_length
            ),
        )?;
        self.show_field(
            "extended_flags",
            entry
                .extended_flags
                .map_or_else(|| "none".to_string(), |flags| format!("{flags:#06x}")),
        )?;

        Ok(())
    }

    fn show_field(&self, label: &str, value: String) -> anyhow::Result<()> {
        writeln!(
            self.writer(),
            "  {}{:width$}{}",
            label.dimmed(),
            "",
            value,
            width = LABEL_WIDTH.saturating_sub(label.len())
        )?;

        Ok(())
    }
}

fn format_time(seconds: u32, nanoseconds: u32) -> String {
    chrono::DateTime::from_timestamp(i64::from(seconds), nanoseconds)
        .map(|datetime| datetime.format("%Y-%m-%d %H:%M:%S%.f UTC").to_string())
        .unwrap_or_else(|| format!("{seconds}.{nanoseconds:09}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0, 0), "1970-01-01 00:00:00 UTC");
        assert_eq!(
            format_time(1_600_000_000, 500_000_000),
            "2020-09-13 12:26:40.500 UTC"
        );
    }

    #[test]
    fn test_format_time_out_of_range_nanoseconds() {
        assert_eq!(format_time(5, 2_000_000_000), "5.2000000000");
    }
}
