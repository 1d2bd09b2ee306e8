//! Movie field update reconciliation
//!
//! Walks the fixed ordered list of editable movie fields over a
//! server-sourced record, asks the caller whether to replace each one,
//! validates replacements through the matching value type, and merges the
//! accepted values into a copy of the record for resubmission.

use std::fmt;

use crate::Result;
use crate::domain::{
    Category, Description, Director, DomainError, DomainResult, ImageUrl, MovieRecord, Title, Year,
};

/// Editable movie fields, in presentation order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditableField {
    Title,
    Description,
    Year,
    Category,
    Director,
    ImageUrl,
}

impl EditableField {
    /// Fixed edit order
    pub const ALL: [EditableField; 6] = [
        EditableField::Title,
        EditableField::Description,
        EditableField::Year,
        EditableField::Category,
        EditableField::Director,
        EditableField::ImageUrl,
    ];

    /// Field name as it appears in the record
    pub fn name(&self) -> &'static str {
        match self {
            EditableField::Title => "title",
            EditableField::Description => "description",
            EditableField::Year => "year",
            EditableField::Category => "category",
            EditableField::Director => "director",
            EditableField::ImageUrl => "image_url",
        }
    }

    /// Current raw value of this field in `record`
    pub fn current_text(&self, record: &MovieRecord) -> String {
        match self {
            EditableField::Title => record.title.clone(),
            EditableField::Description => record.description.clone(),
            EditableField::Year => record.year.to_string(),
            EditableField::Category => record.category.clone(),
            EditableField::Director => record.director.clone(),
            EditableField::ImageUrl => record.image_url.clone(),
        }
    }
}

impl fmt::Display for EditableField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Typed partial update staged by the reconciler
///
/// Every field is optional; a value is staged only after its primitive
/// validation succeeds, so an applied patch cannot taint a record.
#[derive(Debug, Default, Clone)]
pub struct MoviePatch {
    pub title: Option<Title>,
    pub description: Option<Description>,
    pub year: Option<Year>,
    pub category: Option<Category>,
    pub director: Option<Director>,
    pub image_url: Option<ImageUrl>,
}

impl MoviePatch {
    /// True when no replacement has been staged
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.year.is_none()
            && self.category.is_none()
            && self.director.is_none()
            && self.image_url.is_none()
    }

    /// Validate raw text through `field`'s value type and stage it
    ///
    /// Category input is a 1-based index into [`Category::ALL`], as shown
    /// in selection menus.
    pub fn set(&mut self, field: EditableField, input: &str) -> DomainResult<()> {
        match field {
            EditableField::Title => self.title = Some(Title::new(input)?),
            EditableField::Description => self.description = Some(Description::new(input)?),
            EditableField::Year => self.year = Some(Year::parse(input)?),
            EditableField::Category => self.category = Some(parse_category_choice(input)?),
            EditableField::Director => self.director = Some(Director::new(input)?),
            EditableField::ImageUrl => self.image_url = Some(ImageUrl::new(input)?),
        }
        Ok(())
    }

    /// Overwrite staged fields in `record` with their canonical raw form
    pub fn apply_to(&self, record: &mut MovieRecord) {
        if let Some(title) = &self.title {
            record.title = title.as_str().to_string();
        }
        if let Some(description) = &self.description {
            record.description = description.as_str().to_string();
        }
        if let Some(year) = &self.year {
            record.year = year.value();
        }
        if let Some(category) = &self.category {
            record.category = category.as_str().to_string();
        }
        if let Some(director) = &self.director {
            record.director = director.as_str().to_string();
        }
        if let Some(image_url) = &self.image_url {
            record.image_url = image_url.as_str().to_string();
        }
    }
}

/// Translate a 1-based menu choice into a genre
pub fn parse_category_choice(input: &str) -> DomainResult<Category> {
    let index = input.trim().parse::<usize>().map_err(|_| {
        DomainError::format(
            "category",
            format!("pick a number between 1 and {}", Category::ALL.len()),
        )
    })?;
    Category::from_index(index)
}

/// Per-field decisions supplied by the caller during reconciliation
pub trait FieldEditor {
    /// Whether `field`, currently holding `current`, should be replaced
    fn confirm_edit(&mut self, field: EditableField, current: &str) -> Result<bool>;

    /// Raw replacement text for `field`
    fn read_replacement(&mut self, field: EditableField) -> Result<String>;

    /// A replacement failed validation; the same field will be re-prompted
    fn report_invalid(&mut self, field: EditableField, error: &DomainError) -> Result<()>;
}

/// Diff-apply caller-approved edits onto a server-sourced record
///
/// Fields are visited in [`EditableField::ALL`] order. A declined field is
/// left untouched. An accepted field loops read, validate, stage until a
/// replacement passes its value type; nothing is committed before that, so
/// the returned record never carries a value that fails its rule.
pub fn reconcile(record: &MovieRecord, editor: &mut dyn FieldEditor) -> Result<MovieRecord> {
    let mut patch = MoviePatch::default();

    for field in EditableField::ALL {
        if !editor.confirm_edit(field, &field.current_text(record))? {
            continue;
        }
        loop {
            let input = editor.read_replacement(field)?;
            match patch.set(field, &input) {
                Ok(()) => break,
                Err(error) => editor.report_invalid(field, &error)?,
            }
        }
    }

    let mut updated = record.clone();
    patch.apply_to(&mut updated);
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    fn sample_record() -> MovieRecord {
        MovieRecord {
            id: 1,
            title: "Old".to_string(),
            description: "d".to_string(),
            year: 2020,
            category: "ACTION".to_string(),
            director: "Bob Smith".to_string(),
            image_url: "https://image.tmdb.org/t/p/w500/aaaaaaaaaaaaaaaaaaaaaaaaaaa.jpg"
                .to_string(),
        }
    }

    /// Editor that replays canned decisions and inputs
    struct ScriptedEditor {
        decisions: VecDeque<bool>,
        inputs: VecDeque<&'static str>,
        rejections: Vec<(EditableField, DomainError)>,
        confirmed: Vec<(EditableField, String)>,
    }

    impl ScriptedEditor {
        fn new(decisions: &[bool], inputs: &[&'static str]) -> Self {
            Self {
                decisions: decisions.iter().copied().collect(),
                inputs: inputs.iter().copied().collect(),
                rejections: Vec::new(),
                confirmed: Vec::new(),
            }
        }
    }

    impl FieldEditor for ScriptedEditor {
        fn confirm_edit(&mut self, field: EditableField, current: &str) -> Result<bool> {
            self.confirmed.push((field, current.to_string()));
            Ok(self.decisions.pop_front().expect("unexpected confirm"))
        }

        fn read_replacement(&mut self, _field: EditableField) -> Result<String> {
            Ok(self.inputs.pop_front().expect("unexpected read").to_string())
        }

        fn report_invalid(&mut self, field: EditableField, error: &DomainError) -> Result<()> {
            self.rejections.push((field, error.clone()));
            Ok(())
        }
    }

    #[test]
    fn test_replacing_only_the_title_leaves_the_rest_untouched() {
        let record = sample_record();
        let mut editor =
            ScriptedEditor::new(&[true, false, false, false, false, false], &["New Title"]);

        let updated = reconcile(&record, &mut editor).unwrap();

        assert_eq!(updated.title, "New Title");
        assert_eq!(updated.description, record.description);
        assert_eq!(updated.year, record.year);
        assert_eq!(updated.category, record.category);
        assert_eq!(updated.director, record.director);
        assert_eq!(updated.image_url, record.image_url);
        assert!(editor.rejections.is_empty());
    }

    #[test]
    fn test_fields_are_visited_in_declared_order() {
        let record = sample_record();
        let mut editor = ScriptedEditor::new(&[false; 6], &[]);

        let updated = reconcile(&record, &mut editor).unwrap();

        assert_eq!(updated, record);
        let visited: Vec<EditableField> =
            editor.confirmed.iter().map(|(field, _)| *field).collect();
        assert_eq!(visited, EditableField::ALL);
        assert_eq!(editor.confirmed[0].1, "Old");
        assert_eq!(editor.confirmed[2].1, "2020");
    }

    #[test]
    fn test_invalid_replacement_reprompts_without_advancing() {
        let record = sample_record();
        let mut editor = ScriptedEditor::new(
            &[true, false, false, false, false, false],
            &["", "New Title"],
        );

        let updated = reconcile(&record, &mut editor).unwrap();

        assert_eq!(updated.title, "New Title");
        assert_eq!(editor.rejections.len(), 1);
        let (field, error) = &editor.rejections[0];
        assert_eq!(*field, EditableField::Title);
        assert!(error.is_format_failure());
    }

    #[test]
    fn test_category_is_selected_by_one_based_index() {
        let record = sample_record();
        let mut editor =
            ScriptedEditor::new(&[false, false, false, true, false, false], &["x", "0", "3"]);

        let updated = reconcile(&record, &mut editor).unwrap();

        assert_eq!(updated.category, "ADVENTURE");
        assert_eq!(editor.rejections.len(), 2);
        assert!(editor.rejections.iter().all(|(field, error)| {
            *field == EditableField::Category && error.is_format_failure()
        }));
    }

    #[test]
    fn test_year_replacement_distinguishes_failure_kinds() {
        let record = sample_record();
        let mut editor = ScriptedEditor::new(
            &[false, false, true, false, false, false],
            &["nineteen", "1800", "1999"],
        );

        let updated = reconcile(&record, &mut editor).unwrap();

        assert_eq!(updated.year, 1999);
        assert!(editor.rejections[0].1.is_type_failure());
        assert!(editor.rejections[1].1.is_format_failure());
    }

    #[test]
    fn test_reconciled_record_always_revalidates() {
        let record = sample_record();
        let mut editor = ScriptedEditor::new(
            &[true, true, true, true, true, true],
            &[
                "Brand New Title",
                "A longer description",
                "2001",
                "14",
                "Sofia Coppola",
                "https://image.tmdb.org/t/p/w500/bbbbbbbbbbbbbbbbbbbbbbbbbbb.jpg",
            ],
        );

        let updated = reconcile(&record, &mut editor).unwrap();

        let movie = updated.to_movie().unwrap();
        assert_eq!(movie.category, Category::Western);
        assert!(ImageUrl::new(updated.image_url.as_str()).is_ok());
    }

    #[test]
    fn test_patch_is_empty_until_something_is_staged() {
        let mut patch = MoviePatch::default();
        assert!(patch.is_empty());

        patch.set(EditableField::Director, "Sofia Coppola").unwrap();
        assert!(!patch.is_empty());

        let mut record = sample_record();
        patch.apply_to(&mut record);
        assert_eq!(record.director, "Sofia Coppola");
        assert_eq!(record.title, "Old");
    }

    #[test]
    fn test_staging_never_happens_on_failure() {
        let mut patch = MoviePatch::default();
        assert!(patch.set(EditableField::ImageUrl, "not a url").is_err());
        assert!(patch.is_empty());
    }
}
