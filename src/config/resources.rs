//! Resource model: the five tables exposed over HTTP and how each one is served.

/// Primary key column shared by every table.
pub const ID_COLUMN: &str = "id";

/// Storage kind of a column; request values are coerced to it before binding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnKind {
    Integer,
    Text,
}

impl ColumnKind {
    /// PostgreSQL type name used in DDL and parameter casts.
    pub fn pg_type(self) -> &'static str {
        match self {
            ColumnKind::Integer => "INTEGER",
            ColumnKind::Text => "TEXT",
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Field {
    pub name: &'static str,
    pub kind: ColumnKind,
    /// Must be present and non-null on create; also NOT NULL in the table.
    pub required: bool,
    /// HTML-escaped whenever the field is serialized.
    pub free_text: bool,
    /// Table whose `id` this column references.
    pub references: Option<&'static str>,
}

impl Field {
    const fn text(name: &'static str) -> Self {
        Field {
            name,
            kind: ColumnKind::Text,
            required: true,
            free_text: false,
            references: None,
        }
    }

    const fn foreign_key(name: &'static str, table: &'static str) -> Self {
        Field {
            name,
            kind: ColumnKind::Integer,
            required: true,
            free_text: false,
            references: Some(table),
        }
    }

    const fn escaped(self) -> Self {
        Field {
            free_text: true,
            ..self
        }
    }
}

#[derive(Debug)]
pub struct Resource {
    /// Singular name used in messages ("Character doesn't exist").
    pub entity: &'static str,
    /// Collection path; item routes append `/:id`.
    pub path: &'static str,
    pub table: &'static str,
    /// Columns other than `id`, in declaration order.
    pub fields: &'static [Field],
    pub deletable: bool,
    /// Whether the "must contain one of" list wraps names in quotes. Characters
    /// and notice characters have always answered with bare names.
    pub quote_update_fields: bool,
}

impl Resource {
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn required_fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|f| f.required)
    }

    /// Every declared column may be changed by a partial update.
    pub fn updatable_fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter()
    }

    pub fn item_path(&self, id: impl std::fmt::Display) -> String {
        format!("{}/{}", self.path, id)
    }

    pub fn not_found_message(&self) -> String {
        format!("{} doesn't exist", self.entity)
    }

    /// Rejection text for a partial update carrying no usable field.
    pub fn missing_update_fields_message(&self) -> String {
        let names: Vec<String> = self
            .updatable_fields()
            .map(|f| {
                if self.quote_update_fields {
                    format!("'{}'", f.name)
                } else {
                    f.name.to_string()
                }
            })
            .collect();
        format!("Request body must contain one of: {}", names.join(", "))
    }
}

pub static USERS: Resource = Resource {
    entity: "User",
    path: "/api/users",
    table: "users",
    fields: &[
        Field::text("username"),
        Field::text("password"),
        Field::text("email_address"),
        Field::text("role"),
    ],
    deletable: false,
    quote_update_fields: true,
};

pub static CHARACTERS: Resource = Resource {
    entity: "Character",
    path: "/api/characters",
    table: "characters",
    fields: &[
        Field::foreign_key("user_id", "users"),
        Field::text("name").escaped(),
    ],
    deletable: true,
    quote_update_fields: false,
};

pub static NOTICES: Resource = Resource {
    entity: "Notice",
    path: "/api/notices",
    table: "notices",
    fields: &[Field::text("message").escaped(), Field::text("status")],
    deletable: false,
    quote_update_fields: true,
};

pub static NOTICE_PLAYERS: Resource = Resource {
    entity: "NoticePlayer",
    path: "/api/notices/players",
    table: "noticeplayers",
    fields: &[
        Field::foreign_key("notice_id", "notices"),
        Field::text("name").escaped(),
    ],
    deletable: false,
    quote_update_fields: true,
};

pub static NOTICE_CHARACTERS: Resource = Resource {
    entity: "NoticeCharacter",
    path: "/api/notices/characters",
    table: "noticecharacters",
    fields: &[
        Field::foreign_key("notice_id", "notices"),
        Field::text("name").escaped(),
    ],
    deletable: true,
    quote_update_fields: false,
};

/// All served resources, parents before children.
pub static RESOURCES: &[&Resource] = &[
    &USERS,
    &CHARACTERS,
    &NOTICES,
    &NOTICE_PLAYERS,
    &NOTICE_CHARACTERS,
];
