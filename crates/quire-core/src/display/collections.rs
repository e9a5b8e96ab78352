//! Listing wrappers for the archive and the block library.

use std::fmt::{self, Display, Formatter};

use super::LocalDateTime;
use crate::models::{CustomBlock, Document};

/// Wrapper type for displaying archived template snapshots.
pub struct ArchivedTemplates<'a>(pub &'a [Document]);

impl Display for ArchivedTemplates<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "No archived templates.");
        }

        writeln!(f, "# Archived Templates\n")?;
        for (index, snapshot) in self.0.iter().enumerate() {
            let name = if snapshot.task_name.is_empty() {
                "(sem nome)"
            } else {
                snapshot.task_name.as_str()
            };
            write!(f, "- [{index}] **{name}**")?;
            if let Some(archived_at) = &snapshot.archived_at {
                write!(f, " ({})", LocalDateTime::new(archived_at))?;
            }
            writeln!(
                f,
                ": {} steps, {} criteria",
                snapshot.step_count(),
                snapshot.criteria.len()
            )?;
            if !snapshot.scope.is_empty() {
                writeln!(f, "  {}", snapshot.scope)?;
            }
        }
        Ok(())
    }
}

/// Wrapper type for displaying the saved custom blocks.
pub struct BlockList<'a>(pub &'a [CustomBlock]);

impl Display for BlockList<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "No saved blocks.");
        }

        writeln!(f, "# Saved Blocks\n")?;
        for (index, block) in self.0.iter().enumerate() {
            writeln!(f, "- [{index}] **{}**", block.title)?;
            for step in &block.steps {
                writeln!(f, "  - {}", step.text)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_listings() {
        assert_eq!(ArchivedTemplates(&[]).to_string(), "No archived templates.");
        assert_eq!(BlockList(&[]).to_string(), "No saved blocks.");
    }

    #[test]
    fn test_archived_listing() {
        let mut snapshot = Document::default().with_task_name("ACT-7");
        snapshot.scope = "Login".to_string();
        snapshot.criteria.push("A".to_string());
        let listing = ArchivedTemplates(&[snapshot, Document::default()]).to_string();
        assert!(listing.contains("- [0] **ACT-7**: 0 steps, 1 criteria\n  Login"));
        assert!(listing.contains("- [1] **(sem nome)**"));
    }

    #[test]
    fn test_block_listing() {
        let block = CustomBlock::new("Login", ["open".to_string(), "submit".to_string()]);
        let listing = BlockList(&[block]).to_string();
        assert!(listing.contains("- [0] **Login**\n  - open\n  - submit"));
    }
}
