/// Foreign key registry
///
/// One entry per foreign key in the schema, each with an explicit delete
/// policy. The migration owns the DDL; this registry is what the rest of the
/// code (and startup verification) treats as the source of truth for how
/// parent deletes propagate.
///
/// | child column       | parent      | on delete |
/// |--------------------|-------------|-----------|
/// | `tasks.board_id`   | `boards.id` | RESTRICT  |
/// | `tasks.owner_id`   | `users.id`  | CASCADE   |

use sqlx::PgPool;
use std::fmt;
use tracing::{debug, info};

use crate::error::{StoreError, StoreResult};

/// What happens to child rows when their parent row is deleted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeletePolicy {
    /// Parent delete fails while children exist
    Restrict,

    /// Children are deleted with the parent
    Cascade,

    /// Child foreign key is set to NULL
    SetNull,
}

impl DeletePolicy {
    /// SQL keyword used in `ON DELETE ...`
    pub fn as_sql(&self) -> &'static str {
        match self {
            DeletePolicy::Restrict => "RESTRICT",
            DeletePolicy::Cascade => "CASCADE",
            DeletePolicy::SetNull => "SET NULL",
        }
    }

    /// Parses `information_schema.referential_constraints.delete_rule`
    ///
    /// `NO ACTION` and `SET DEFAULT` have no counterpart and return `None`.
    pub fn from_delete_rule(rule: &str) -> Option<Self> {
        match rule {
            "RESTRICT" => Some(DeletePolicy::Restrict),
            "CASCADE" => Some(DeletePolicy::Cascade),
            "SET NULL" => Some(DeletePolicy::SetNull),
            _ => None,
        }
    }
}

impl fmt::Display for DeletePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// A single foreign key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Relationship {
    /// Child table
    pub table: &'static str,

    /// Foreign key column on the child table
    pub column: &'static str,

    /// Parent table
    pub references_table: &'static str,

    /// Referenced column on the parent table
    pub references_column: &'static str,

    /// Whether the child column is NOT NULL
    pub required: bool,

    /// Delete propagation
    pub on_delete: DeletePolicy,
}

impl Relationship {
    /// Constraint name used in the migration (`fk_<table>_<column>`)
    pub fn constraint_name(&self) -> String {
        format!("fk_{}_{}", self.table, self.column)
    }
}

impl fmt::Display for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{} -> {}.{} ON DELETE {}",
            self.table, self.column, self.references_table, self.references_column, self.on_delete
        )
    }
}

/// Task belongs to a board; a board with tasks cannot be deleted
pub const TASK_BOARD: Relationship = Relationship {
    table: "tasks",
    column: "board_id",
    references_table: "boards",
    references_column: "id",
    required: true,
    on_delete: DeletePolicy::Restrict,
};

/// Task belongs to its owning user; removing the user removes their tasks
pub const TASK_OWNER: Relationship = Relationship {
    table: "tasks",
    column: "owner_id",
    references_table: "users",
    references_column: "id",
    required: true,
    on_delete: DeletePolicy::Cascade,
};

/// Every foreign key in the schema
pub const RELATIONSHIPS: &[Relationship] = &[TASK_BOARD, TASK_OWNER];

/// Looks up the registered relationship for a child column
pub fn find(table: &str, column: &str) -> Option<&'static Relationship> {
    RELATIONSHIPS
        .iter()
        .find(|r| r.table == table && r.column == column)
}

#[derive(Debug, sqlx::FromRow)]
struct LiveForeignKey {
    table_name: String,
    column_name: String,
    references_table: String,
    references_column: String,
    delete_rule: String,
}

/// Checks the live schema against [`RELATIONSHIPS`]
///
/// # Errors
///
/// `ConstraintViolation` if a registered foreign key is missing, points
/// elsewhere, or carries a different delete rule.
pub async fn verify_relationships(pool: &PgPool) -> StoreResult<()> {
    let live = sqlx::query_as::<_, LiveForeignKey>(
        r#"
        SELECT kcu.table_name::TEXT AS table_name,
               kcu.column_name::TEXT AS column_name,
               ccu.table_name::TEXT AS references_table,
               ccu.column_name::TEXT AS references_column,
               rc.delete_rule::TEXT AS delete_rule
        FROM information_schema.referential_constraints rc
        JOIN information_schema.key_column_usage kcu
          ON rc.constraint_name = kcu.constraint_name
         AND rc.constraint_schema = kcu.constraint_schema
        JOIN information_schema.constraint_column_usage ccu
          ON rc.constraint_name = ccu.constraint_name
         AND rc.constraint_schema = ccu.constraint_schema
        WHERE rc.constraint_schema = current_schema()
        "#,
    )
    .fetch_all(pool)
    .await?;

    for rel in RELATIONSHIPS {
        let found = live
            .iter()
            .find(|fk| fk.table_name == rel.table && fk.column_name == rel.column)
            .ok_or_else(|| StoreError::constraint(format!("missing foreign key {}", rel)))?;

        if found.references_table != rel.references_table
            || found.references_column != rel.references_column
        {
            return Err(StoreError::constraint(format!(
                "foreign key {}.{} references {}.{}, expected {}",
                rel.table, rel.column, found.references_table, found.references_column, rel
            )));
        }

        if DeletePolicy::from_delete_rule(&found.delete_rule) != Some(rel.on_delete) {
            return Err(StoreError::constraint(format!(
                "foreign key {}.{} has ON DELETE {}, expected {}",
                rel.table, rel.column, found.delete_rule, rel.on_delete
            )));
        }

        debug!(relationship = %rel, "Foreign key verified");
    }

    info!(count = RELATIONSHIPS.len(), "Relationships verified");
    Ok(())
}
