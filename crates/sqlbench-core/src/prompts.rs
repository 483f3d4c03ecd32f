use crate::errors::ConfigError;
use crate::model::ChatMessage;
use crate::storage::SchemaDescription;
use std::fmt;
use std::str::FromStr;

/// Named strategy for instructing a model to write SQL.
///
/// `Minimal` deliberately withholds the schema: it is the ablation baseline
/// the other templates are compared against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PromptTemplate {
    Minimal,
    SchemaAware,
    Guardrails,
    FewShot,
    Analyst,
}

/// System instructions plus the user's question, ready for a chat backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptPair {
    pub system: String,
    pub user: String,
}

impl PromptPair {
    pub fn messages(&self) -> Vec<ChatMessage> {
        vec![
            ChatMessage::system(self.system.clone()),
            ChatMessage::user(self.user.clone()),
        ]
    }
}

impl PromptTemplate {
    pub const ALL: [PromptTemplate; 5] = [
        PromptTemplate::Minimal,
        PromptTemplate::SchemaAware,
        PromptTemplate::Guardrails,
        PromptTemplate::FewShot,
        PromptTemplate::Analyst,
    ];

    /// Templates swept by the default benchmark.
    pub const BENCHMARK: [PromptTemplate; 4] = [
        PromptTemplate::Minimal,
        PromptTemplate::SchemaAware,
        PromptTemplate::Guardrails,
        PromptTemplate::FewShot,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            PromptTemplate::Minimal => "minimal",
            PromptTemplate::SchemaAware => "schema_aware",
            PromptTemplate::Guardrails => "guardrails",
            PromptTemplate::FewShot => "few_shot",
            PromptTemplate::Analyst => "analyst",
        }
    }

    pub fn includes_schema(&self) -> bool {
        !matches!(self, PromptTemplate::Minimal)
    }

    pub fn build(&self, question: &str, schema: &SchemaDescription) -> PromptPair {
        let schema = schema.render();
        let system = match self {
            PromptTemplate::Minimal => "Return only SQL.".to_string(),
            PromptTemplate::SchemaAware => format!(
                "You are a text-to-SQL generator. Use the schema:\n\n{schema}\n\nReturn ONLY SQL. Do not invent tables."
            ),
            PromptTemplate::Guardrails => format!(
                "Return ONLY SQL.\n\
                 Follow these rules:\n\
                 - Use ONLY the tables and columns listed below.\n\
                 - DO NOT invent tables.\n\
                 - DO NOT invent columns.\n\
                 - Dates are TEXT.\n\n\
                 {schema}"
            ),
            PromptTemplate::FewShot => format!(
                "You are a text-to-SQL generator. Use this schema:\n\n\
                 {schema}\n\
                 Example:\n\
                 Q: What was India's CPI in 2020?\n\
                 SQL: SELECT value FROM cpi WHERE country='India' AND time_period='2020';\n\n\
                 Example:\n\
                 Q: What was China's GDP in 2015?\n\
                 SQL: SELECT value FROM gdp WHERE country='China' AND time_period='2015';\n\n\
                 Now return SQL for the user's question."
            ),
            PromptTemplate::Analyst => format!(
                "You are an expert IMF analyst. You have access to a SQLite database with this schema:\n\n\
                 {schema}\n\
                 Your job:\n\
                 1. Interpret the user's question.\n\
                 2. Write ONLY the SQL query needed to answer it.\n\
                 3. Use correct table + column names. Never invent tables or columns.\n\
                 4. Dates are TEXT, formatted YYYY, YYYY-MM or YYYY-MM-DD.\n\
                 5. No commentary. No backticks. SQL ONLY."
            ),
        };

        PromptPair {
            system,
            user: format!("Question: {question}\nSQL:"),
        }
    }
}

impl fmt::Display for PromptTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PromptTemplate {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PromptTemplate::ALL
            .into_iter()
            .find(|t| t.name() == s)
            .ok_or_else(|| ConfigError::UnknownTemplate {
                name: s.to_string(),
                expected: PromptTemplate::ALL
                    .iter()
                    .map(|t| t.name())
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }
}

/// Looks up `name` and builds its prompt. Unknown names are a configuration
/// error, never a silent fallback.
pub fn build(
    name: &str,
    question: &str,
    schema: &SchemaDescription,
) -> Result<PromptPair, ConfigError> {
    Ok(name.parse::<PromptTemplate>()?.build(question, schema))
}

/// Messages asking a model to explain a query result in plain English.
pub fn explain(question: &str, result_text: &str) -> PromptPair {
    PromptPair {
        system: "You summarize IMF data professionally.".to_string(),
        user: format!(
            "You are an IMF financial data analyst. The user asked:\n\n\
             {question}\n\n\
             Here are the raw query results:\n\n\
             {result_text}\n\n\
             Please answer the question in clear English.\n\
             Summarize the results naturally. Do not show SQL."
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::schema::{ColumnDescriptor, TableDescriptor};

    fn schema() -> SchemaDescription {
        SchemaDescription {
            tables: vec![TableDescriptor {
                name: "gdp".into(),
                columns: vec![ColumnDescriptor {
                    name: "country".into(),
                    declared_type: "TEXT".into(),
                }],
            }],
        }
    }

    #[test]
    fn schema_aware_templates_embed_schema() {
        let rendered = schema().render();
        for t in PromptTemplate::ALL {
            let p = t.build("q?", &schema());
            assert_eq!(
                p.system.contains(&rendered),
                t.includes_schema(),
                "template {t}"
            );
            assert_eq!(p.user, "Question: q?\nSQL:");
        }
    }

    #[test]
    fn minimal_withholds_schema() {
        let p = PromptTemplate::Minimal.build("q", &schema());
        assert_eq!(p.system, "Return only SQL.");
        assert!(!p.system.contains("TABLE:"));
    }

    #[test]
    fn names_round_trip() {
        for t in PromptTemplate::ALL {
            assert_eq!(t.name().parse::<PromptTemplate>().unwrap(), t);
        }
    }

    #[test]
    fn unknown_name_is_config_error() {
        let err = build("schema-aware", "q", &schema()).unwrap_err();
        match err {
            ConfigError::UnknownTemplate { name, expected } => {
                assert_eq!(name, "schema-aware");
                assert!(expected.contains("schema_aware"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn messages_are_system_then_user() {
        let msgs = PromptTemplate::FewShot.build("q", &schema()).messages();
        assert_eq!(msgs.len(), 2);
        assert_eq!(msgs[0].role, crate::model::Role::System);
        assert_eq!(msgs[1].content, "Question: q\nSQL:");
    }
}
