/// Declarative table definitions for the TaskTrack schema
///
/// Tables are described as constant data and rendered to PostgreSQL DDL on
/// demand. Column defaults are always rendered as server-side defaults, so
/// they apply to every insert that omits the column, including inserts that
/// bypass this crate.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id SERIAL PRIMARY KEY,
///     username VARCHAR(50) NOT NULL UNIQUE,
///     password VARCHAR(100) NOT NULL,
///     created_at TIMESTAMP DEFAULT now()
/// );
///
/// CREATE TABLE tasks (
///     id SERIAL PRIMARY KEY,
///     user_id INTEGER REFERENCES users (id) ON DELETE CASCADE,
///     title VARCHAR(100) NOT NULL,
///     description TEXT,
///     status VARCHAR(20) DEFAULT 'pending',
///     created_at TIMESTAMP DEFAULT now()
/// );
///
/// CREATE TABLE comments (
///     id SERIAL PRIMARY KEY,
///     task_id INTEGER REFERENCES tasks (id) ON DELETE CASCADE,
///     user_id INTEGER REFERENCES users (id) ON DELETE CASCADE,
///     content TEXT NOT NULL,
///     created_at TIMESTAMP DEFAULT now()
/// );
/// ```
///
/// # Example
///
/// ```
/// use tasktrack_schema::schema::{TABLES, USERS};
///
/// assert_eq!(TABLES[0].name, "users");
/// assert!(USERS.create_sql().starts_with("CREATE TABLE users ("));
/// assert_eq!(USERS.drop_sql(), "DROP TABLE users");
/// ```

use std::fmt::Write;

/// SQL type of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    /// Auto-assigned integer (backed by a sequence)
    Serial,
    Integer,
    /// Bounded string, `VARCHAR(n)`
    Varchar(u32),
    Text,
    /// Timestamp without time zone
    Timestamp,
}

impl ColumnType {
    fn sql(&self) -> String {
        match self {
            Self::Serial => "SERIAL".to_string(),
            Self::Integer => "INTEGER".to_string(),
            Self::Varchar(len) => format!("VARCHAR({})", len),
            Self::Text => "TEXT".to_string(),
            Self::Timestamp => "TIMESTAMP".to_string(),
        }
    }
}

/// Server-side column default, evaluated by PostgreSQL at insert time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnDefault {
    /// `now()`
    Now,
    /// A string literal
    Literal(&'static str),
}

impl ColumnDefault {
    fn sql(&self) -> String {
        match self {
            Self::Now => "now()".to_string(),
            Self::Literal(value) => format!("'{}'", value.replace('\'', "''")),
        }
    }
}

/// Action taken on referencing rows when the referenced row is deleted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OnDelete {
    /// Reject the delete while references exist (PostgreSQL default)
    #[default]
    NoAction,
    /// Delete referencing rows along with the referenced row
    Cascade,
}

/// Foreign key reference from a column to `table(column)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForeignKey {
    pub table: &'static str,
    pub column: &'static str,
    pub on_delete: OnDelete,
}

/// Column definition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub name: &'static str,
    pub ty: ColumnType,
    pub primary_key: bool,
    pub nullable: bool,
    pub unique: bool,
    pub default: Option<ColumnDefault>,
    pub references: Option<ForeignKey>,
}

impl Column {
    /// Nullable column with no constraints
    pub const fn new(name: &'static str, ty: ColumnType) -> Self {
        Self {
            name,
            ty,
            primary_key: false,
            nullable: true,
            unique: false,
            default: None,
            references: None,
        }
    }

    /// Marks the column as primary key (implies NOT NULL)
    pub const fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self.nullable = false;
        self
    }

    pub const fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    pub const fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    pub const fn default(mut self, default: ColumnDefault) -> Self {
        self.default = Some(default);
        self
    }

    /// Adds a foreign key to `table(column)`
    pub const fn references(
        mut self,
        table: &'static str,
        column: &'static str,
        on_delete: OnDelete,
    ) -> Self {
        self.references = Some(ForeignKey {
            table,
            column,
            on_delete,
        });
        self
    }

    /// Renders the column definition as used inside `CREATE TABLE`
    pub fn definition_sql(&self) -> String {
        let mut sql = format!("{} {}", self.name, self.ty.sql());

        if self.primary_key {
            sql.push_str(" PRIMARY KEY");
        } else if !self.nullable {
            sql.push_str(" NOT NULL");
        }
        if self.unique {
            sql.push_str(" UNIQUE");
        }
        if let Some(default) = &self.default {
            let _ = write!(sql, " DEFAULT {}", default.sql());
        }
        if let Some(fk) = &self.references {
            let _ = write!(sql, " REFERENCES {} ({})", fk.table, fk.column);
            if fk.on_delete == OnDelete::Cascade {
                sql.push_str(" ON DELETE CASCADE");
            }
        }

        sql
    }
}

/// Table definition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Table {
    pub name: &'static str,
    pub columns: &'static [Column],
}

impl Table {
    /// Renders `CREATE TABLE` with inline column constraints
    pub fn create_sql(&self) -> String {
        let columns = self
            .columns
            .iter()
            .map(|c| format!("    {}", c.definition_sql()))
            .collect::<Vec<_>>()
            .join(",\n");

        format!("CREATE TABLE {} (\n{}\n)", self.name, columns)
    }

    /// Renders a plain `DROP TABLE`
    ///
    /// No `IF EXISTS` and no `CASCADE`: dropping a missing table or a table
    /// that is still referenced fails instead of silently succeeding.
    pub fn drop_sql(&self) -> String {
        format!("DROP TABLE {}", self.name)
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Names of the tables this table references, excluding itself
    pub fn dependencies(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.columns
            .iter()
            .filter_map(|c| c.references.map(|fk| fk.table))
            .filter(move |t| *t != self.name)
    }
}

pub const USERS: Table = Table {
    name: "users",
    columns: &[
        Column::new("id", ColumnType::Serial).primary_key(),
        Column::new("username", ColumnType::Varchar(50)).not_null().unique(),
        Column::new("password", ColumnType::Varchar(100)).not_null(),
        Column::new("created_at", ColumnType::Timestamp).default(ColumnDefault::Now),
    ],
};

// Foreign keys stay nullable: unowned rows are accepted.
pub const TASKS: Table = Table {
    name: "tasks",
    columns: &[
        Column::new("id", ColumnType::Serial).primary_key(),
        Column::new("user_id", ColumnType::Integer).references("users", "id", OnDelete::Cascade),
        Column::new("title", ColumnType::Varchar(100)).not_null(),
        Column::new("description", ColumnType::Text),
        Column::new("status", ColumnType::Varchar(20)).default(ColumnDefault::Literal("pending")),
        Column::new("created_at", ColumnType::Timestamp).default(ColumnDefault::Now),
    ],
};

pub const COMMENTS: Table = Table {
    name: "comments",
    columns: &[
        Column::new("id", ColumnType::Serial).primary_key(),
        Column::new("task_id", ColumnType::Integer).references("tasks", "id", OnDelete::Cascade),
        Column::new("user_id", ColumnType::Integer).references("users", "id", OnDelete::Cascade),
        Column::new("content", ColumnType::Text).not_null(),
        Column::new("created_at", ColumnType::Timestamp).default(ColumnDefault::Now),
    ],
};

/// All tables in creation order (referenced tables first)
pub const TABLES: [Table; 3] = [USERS, TASKS, COMMENTS];

/// Default value stored in `tasks.status` when the writer omits it
pub const DEFAULT_TASK_STATUS: &str = "pending";
