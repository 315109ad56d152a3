//! The two tables the store serves and their constraints.

#[derive(Debug)]
pub(super) struct ForeignKey {
    pub(super) column: &'static str,
    pub(super) references: &'static str,
}

#[derive(Debug)]
pub(super) struct TableSchema {
    pub(super) name: &'static str,
    pub(super) columns: &'static [&'static str],

    /// Non-null on insert.
    pub(super) required: &'static [&'static str],

    /// May be set on insert but never changed afterwards.
    pub(super) immutable: &'static [&'static str],

    /// Rows are deleted along with the referenced row.
    pub(super) foreign_key: Option<ForeignKey>,
}

/// Filled by the store on insert; clients cannot write them.
pub(super) const MANAGED: &[&str] = &["id", "created_at", "updated_at"];

pub(super) const SCHEMAS: &[TableSchema] = &[
    TableSchema {
        name: "projects",
        columns: &["id", "name", "description", "created_at", "updated_at"],
        required: &["name"],
        immutable: &[],
        foreign_key: None,
    },
    TableSchema {
        name: "code_snippets",
        columns: &[
            "id",
            "project_id",
            "title",
            "code",
            "language",
            "created_at",
            "updated_at",
        ],
        required: &["project_id", "title", "code", "language"],
        immutable: &["project_id"],
        foreign_key: Some(ForeignKey {
            column: "project_id",
            references: "projects",
        }),
    },
];

pub(super) fn lookup_table(name: &str) -> Option<&'static TableSchema> {
    SCHEMAS.iter().find(|t| t.name == name)
}

impl TableSchema {
    pub(super) fn has_column(&self, col: &str) -> bool {
        self.columns.contains(&col)
    }

    /// Tables holding a foreign key into `self`.
    pub(super) fn dependents(&self) -> impl Iterator<Item = &'static TableSchema> + '_ {
        SCHEMAS.iter().filter(move |t| {
            t.foreign_key
                .as_ref()
                .is_some_and(|fk| fk.references == self.name)
        })
    }
}
