use clap::{Args, Parser, Subcommand};
use invtrack::index::Position;
use invtrack::validation::RecordForm;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "invtrack")]
#[command(about = "Flat-file inventory tracking with an audit trail", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// User recorded in the audit log
    #[arg(short, long, global = true, env = "INVTRACK_USER")]
    pub user: Option<String>,

    /// Directory holding the inventory and audit files (default: current dir)
    #[arg(short, long, global = true, env = "INVTRACK_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Entry form fields. On `update`, omitted fields keep their current value.
#[derive(Args, Debug, Default)]
pub struct FormArgs {
    /// Item ID (digits, 1-6 characters)
    #[arg(long)]
    pub id: Option<String>,

    /// Item name (2-50 characters)
    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub category: Option<String>,

    /// Quantity (1-10000)
    #[arg(long)]
    pub quantity: Option<String>,

    #[arg(long)]
    pub unit: Option<String>,

    /// Location (2-30 characters)
    #[arg(long)]
    pub location: Option<String>,

    #[arg(long)]
    pub condition: Option<String>,

    /// Date acquired, DD/MM/YY
    #[arg(long = "date")]
    pub date_acquired: Option<String>,
}

impl FormArgs {
    /// Fills the form, taking unset fields from `base`.
    pub fn into_form(self, base: RecordForm) -> RecordForm {
        RecordForm {
            id: self.id.unwrap_or(base.id),
            name: self.name.unwrap_or(base.name),
            category: self.category.unwrap_or(base.category),
            quantity: self.quantity.unwrap_or(base.quantity),
            unit: self.unit.unwrap_or(base.unit),
            location: self.location.unwrap_or(base.location),
            condition: self.condition.unwrap_or(base.condition),
            date_acquired: self.date_acquired.unwrap_or(base.date_acquired),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List all items
    #[command(alias = "ls")]
    List,

    /// Search items by keyword or pattern (case-insensitive)
    #[command(alias = "s")]
    Search { keyword: String },

    /// Add an item
    #[command(alias = "a")]
    Add {
        #[command(flatten)]
        form: FormArgs,
    },

    /// Replace the item at a position
    #[command(alias = "u")]
    Update {
        /// Position of the item (as shown by `list`)
        position: Position,

        #[command(flatten)]
        form: FormArgs,
    },

    /// Delete the item at a position
    #[command(alias = "rm")]
    Delete {
        /// Position of the item (as shown by `list`)
        position: Position,
    },

    /// Show the audit log
    Audit {
        /// Record the access as a refresh
        #[arg(long)]
        refresh: bool,
    },

    /// Record a login for the current user
    Login {
        /// Record a failed login with this reason instead
        #[arg(long, value_name = "REASON")]
        failed: Option<String>,
    },

    /// Record a logout for the current user
    Logout,

    /// Create the config and data files
    Init,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_add_form() {
        let cli = Cli::try_parse_from([
            "invtrack", "add", "--id", "1", "--name", "Chair", "--date", "01/01/24",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Add { form }) => {
                assert_eq!(form.id.as_deref(), Some("1"));
                assert_eq!(form.date_acquired.as_deref(), Some("01/01/24"));
                assert!(form.unit.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn update_keeps_unset_fields() {
        let base = RecordForm {
            id: "1".into(),
            name: "Chair".into(),
            quantity: "5".into(),
            ..RecordForm::default()
        };
        let args = FormArgs {
            quantity: Some("7".into()),
            ..FormArgs::default()
        };
        let form = args.into_form(base);
        assert_eq!(form.name, "Chair");
        assert_eq!(form.quantity, "7");
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["invtrack", "ls", "--user", "ana", "-v"]).unwrap();
        assert_eq!(cli.user.as_deref(), Some("ana"));
        assert!(cli.verbose);
        assert!(matches!(cli.command, Some(Commands::List)));
    }

    #[test]
    fn rejects_position_zero() {
        assert!(Cli::try_parse_from(["invtrack", "rm", "0"]).is_err());
        let cli = Cli::try_parse_from(["invtrack", "rm", "3"]).unwrap();
        match cli.command {
            Some(Commands::Delete { position }) => assert_eq!(position.get(), 3),
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
