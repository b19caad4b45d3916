//! # Field Directive Synthesis
//!
//! Turns a model's field list into the schema-builder statements that fill
//! the `{{fields}}` block of a migration stub:
//!
//! ```text
//! $table->increments('id');                      // only without a primary field
//!
//! $table->string('title')->nullable()->unique();
//! $table->unsignedInteger('user_id');
//! $table->foreign('user_id')->references('id')->on('users');
//!
//!
//! $table->timestamps();
//! ```
//!
//! Statements follow field declaration order; a foreign key constraint comes
//! right after its own column.

use scaffolder_core::{CodeGenContext, CodeGenerable, ScaffoldResult};
use scaffolder_ir::{ColumnDefinition, ModelData};

/// The column statement of one field, plus its foreign key constraint
#[derive(Debug, Clone, Copy)]
pub struct ColumnStatement<'a> {
    column: &'a ColumnDefinition,
}

impl<'a> ColumnStatement<'a> {
    pub fn new(column: &'a ColumnDefinition) -> Self {
        Self { column }
    }
}

impl CodeGenerable for ColumnStatement<'_> {
    fn generate(&self, ctx: &CodeGenContext) -> ScaffoldResult<String> {
        let indent = ctx.indent();
        let column = self.column;

        let mut out = format!(
            "{indent}$table->{}('{}')",
            column.column_type, column.name
        );

        for modifier in &column.modifiers {
            out.push_str(&modifier.to_call());
        }

        if column.index.is_indexed() {
            out.push_str(&format!("->{}()", column.index));
        }
        out.push_str(";\n");

        if let Some(fk) = &column.foreign_key {
            out.push_str(&format!(
                "{indent}$table->foreign('{}')->references('{}')->on('{}');\n\n",
                column.name, fk.referenced_column, fk.referenced_table
            ));
        }

        Ok(out)
    }
}

/// Build the `{{fields}}` block for a model.
///
/// Without a field declared `primary`, an auto-incrementing `id` column is
/// emitted first. The block always ends with the timestamps statement.
pub fn synthesize_fields(model: &ModelData, ctx: &CodeGenContext) -> ScaffoldResult<String> {
    let columns = model.columns()?;
    let indent = ctx.indent();

    let mut out = String::with_capacity(64 * (columns.len() + 2));

    if !columns.iter().any(ColumnDefinition::is_primary) {
        out.push_str(&format!("{indent}$table->increments('id');\n\n"));
    }

    for column in &columns {
        out.push_str(&ColumnStatement::new(column).generate(ctx)?);
    }

    out.push('\n');
    out.push_str(&format!("{indent}$table->timestamps();\n"));

    tracing::debug!(
        columns = columns.len(),
        default_primary_key = !model.has_primary_key(),
        "synthesized field directives",
    );

    Ok(out)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use scaffolder_ir::FieldDescriptor;

    const I: &str = "            ";

    fn ctx() -> CodeGenContext {
        CodeGenContext::at_level(3)
    }

    #[test]
    fn test_default_primary_key() {
        let model = ModelData::new(vec![FieldDescriptor::new("title", "string")]);
        let out = synthesize_fields(&model, &ctx()).unwrap();

        assert_eq!(
            out,
            format!(
                "{I}$table->increments('id');\n\n{I}$table->string('title');\n\n{I}$table->timestamps();\n"
            )
        );
        assert_eq!(out.matches("increments('id')").count(), 1);
    }

    #[test]
    fn test_explicit_primary_key_suppresses_default() {
        let model = ModelData::new(vec![
            FieldDescriptor::new("code", "string").primary(),
            FieldDescriptor::new("label", "string"),
        ]);
        let out = synthesize_fields(&model, &ctx()).unwrap();

        assert!(!out.contains("increments('id')"));
        assert!(out.starts_with(&format!("{I}$table->string('code')->primary();\n")));
    }

    #[test]
    fn test_modifier_chain() {
        let model = ModelData::new(vec![
            FieldDescriptor::new("views", "integer").with_modifiers("nullable:default,0"),
        ]);
        let out = synthesize_fields(&model, &ctx()).unwrap();
        assert!(out.contains(&format!(
            "{I}$table->integer('views')->nullable()->default(0);\n"
        )));
    }

    #[test]
    fn test_index_after_modifiers() {
        let model = ModelData::new(vec![
            FieldDescriptor::new("email", "string")
                .with_modifiers("nullable")
                .with_index("unique"),
        ]);
        let out = synthesize_fields(&model, &ctx()).unwrap();
        assert!(out.contains("$table->string('email')->nullable()->unique();\n"));
    }

    #[test]
    fn test_foreign_key_follows_its_column() {
        let model = ModelData::new(vec![
            FieldDescriptor::new("user_id", "unsignedInteger").with_foreign_key("id:users"),
            FieldDescriptor::new("title", "string"),
        ]);
        let out = synthesize_fields(&model, &ctx()).unwrap();

        let expected = format!(
            "{I}$table->increments('id');\n\n\
             {I}$table->unsignedInteger('user_id');\n\
             {I}$table->foreign('user_id')->references('id')->on('users');\n\n\
             {I}$table->string('title');\n\n\
             {I}$table->timestamps();\n"
        );
        assert_eq!(out, expected);
    }

    #[test]
    fn test_spatial_column_with_spatial_index() {
        let model = ModelData::new(vec![
            FieldDescriptor::new("location", "point").with_index("spatialIndex"),
        ]);
        let out = synthesize_fields(&model, &ctx()).unwrap();
        assert!(out.contains(&format!("{I}$table->point('location')->spatialIndex();\n")));
    }

    #[test]
    fn test_field_order_is_preserved() {
        let model = ModelData::new(vec![
            FieldDescriptor::new("zeta", "string"),
            FieldDescriptor::new("alpha", "string"),
            FieldDescriptor::new("mid", "string"),
        ]);
        let out = synthesize_fields(&model, &ctx()).unwrap();

        let zeta = out.find("'zeta'").unwrap();
        let alpha = out.find("'alpha'").unwrap();
        let mid = out.find("'mid'").unwrap();
        assert!(zeta < alpha && alpha < mid);
    }

    #[test]
    fn test_empty_model() {
        let out = synthesize_fields(&ModelData::default(), &ctx()).unwrap();
        assert_eq!(
            out,
            format!("{I}$table->increments('id');\n\n\n{I}$table->timestamps();\n")
        );
    }

    #[test]
    fn test_malformed_modifier_fails() {
        let model = ModelData::new(vec![
            FieldDescriptor::new("price", "decimal").with_modifiers("default,1,2"),
        ]);
        let err = synthesize_fields(&model, &ctx()).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_malformed_foreign_key_fails() {
        let model = ModelData::new(vec![
            FieldDescriptor::new("user_id", "integer").with_foreign_key("users"),
        ]);
        let err = synthesize_fields(&model, &ctx()).unwrap_err();
        assert!(err.to_string().contains("Invalid foreign key 'users'"));
    }

    #[test]
    fn test_column_statement_at_custom_indent() {
        let column = FieldDescriptor::new("title", "string").to_column().unwrap();
        let out = ColumnStatement::new(&column)
            .generate(&CodeGenContext::new())
            .unwrap();
        assert_eq!(out, "$table->string('title');\n");
    }
}
