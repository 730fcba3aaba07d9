//! Authoring session over a clause's part list
//!
//! Encodes the editing rules that determine which content values an author
//! can reach:
//! - The working list is never empty; a single empty text part stands in
//! - Variables and iterations are always surrounded by text parts, possibly
//!   empty ones
//! - Text parts are edited in place; variables and iterations are replaced
//!   wholesale
//! - Deleting a variable also removes the blank text part that follows it
//!
//! # State machine
//!
//! ```text
//! Empty → Editing ⇄ Editing → Validating → Persisted
//!                                      └─→ RejectedWithErrors → Editing
//! ```
//!
//! Indices taken by edit operations are 0-based; positions in validation
//! issues are 1-based.

use crate::error::{EditError, SubmitError};
use crate::format::ClauseBody;
use crate::model::{ContentPart, ContentPartType, IterationPart, StructuredContent, TextPart, VariablePart};
use crate::serializer::serialize_structured_content;
use crate::validation::{validate_for_submission, ValidationReport};

/// Lifecycle state of an authoring session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionState {
    /// Nothing authored yet
    Empty,
    /// At least one edit applied since the last submit
    Editing,
    /// Submit in progress
    Validating,
    /// Last submit validated and serialized
    Persisted,
    /// Last submit failed validation
    RejectedWithErrors,
}

impl SessionState {
    /// States reachable in one step
    #[must_use]
    pub fn allowed_transitions(self) -> &'static [SessionState] {
        use SessionState::*;
        match self {
            Empty | Editing | Persisted | RejectedWithErrors => &[Editing, Validating],
            Validating => &[Persisted, RejectedWithErrors, Editing],
        }
    }

    /// Check a single step
    #[inline]
    #[must_use]
    pub fn can_transition(self, to: SessionState) -> bool {
        self.allowed_transitions().contains(&to)
    }
}

/// Working copy of a clause's structured content
#[derive(Debug, Clone)]
pub struct AuthoringSession {
    parts: Vec<ContentPart>,
    state: SessionState,
    last_report: Option<ValidationReport>,
}

impl AuthoringSession {
    /// Start composing a new clause
    #[must_use]
    pub fn new() -> Self {
        Self {
            parts: vec![TextPart::empty().into()],
            state: SessionState::Empty,
            last_report: None,
        }
    }

    /// Edit existing structured content
    #[must_use]
    pub fn from_content(content: StructuredContent) -> Self {
        let mut session = Self {
            parts: content.parts,
            state: SessionState::Editing,
            last_report: None,
        };
        session.ensure_text_part();
        session
    }

    /// Edit a stored body
    ///
    /// Legacy plain text becomes a single text part.
    #[must_use]
    pub fn from_stored(raw: &str) -> Self {
        match ClauseBody::from_stored(raw) {
            ClauseBody::Structured(content) => Self::from_content(content),
            ClauseBody::Plain(text) => Self::from_content(StructuredContent::new(vec![ContentPart::text(text)])),
        }
    }

    /// Current state
    #[inline]
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Parts of the working copy, never empty
    #[inline]
    #[must_use]
    pub fn parts(&self) -> &[ContentPart] {
        &self.parts
    }

    /// Report from the last rejected submit
    #[inline]
    #[must_use]
    pub fn last_report(&self) -> Option<&ValidationReport> {
        self.last_report.as_ref()
    }

    /// Snapshot of the working copy
    #[must_use]
    pub fn content(&self) -> StructuredContent {
        StructuredContent::new(self.parts.clone())
    }

    /// Consume the session, returning its content
    #[must_use]
    pub fn into_content(self) -> StructuredContent {
        StructuredContent::new(self.parts)
    }

    /// Append a variable, keeping it between text parts
    pub fn insert_variable(&mut self, path: impl Into<String>) {
        self.insert_bounded(VariablePart::new(path).into());
    }

    /// Append an iteration, keeping it between text parts
    pub fn insert_iteration(&mut self, iteration: IterationPart) {
        self.insert_bounded(iteration.into());
    }

    fn insert_bounded(&mut self, part: ContentPart) {
        if !self.parts.last().is_some_and(ContentPart::is_text) {
            self.parts.push(TextPart::empty().into());
        }
        self.parts.push(part);
        self.parts.push(TextPart::empty().into());
        self.touch();
    }

    /// Replace the content of a text part in place
    ///
    /// # Errors
    /// Fails if there is no part at `index` or it is not a text part.
    pub fn update_text(&mut self, index: usize, content: impl Into<String>) -> Result<(), EditError> {
        let len = self.parts.len();
        match self.parts.get_mut(index) {
            Some(ContentPart::Text(text)) => {
                text.content = content.into();
                self.touch();
                Ok(())
            }
            Some(other) => Err(EditError::KindMismatch {
                index,
                expected: ContentPartType::Text,
                actual: other.part_type(),
            }),
            None => Err(EditError::out_of_bounds(index, len)),
        }
    }

    /// Replace a part wholesale with a new part of the same kind
    ///
    /// Returns the replaced part.
    ///
    /// # Errors
    /// Fails if there is no part at `index` or the kinds differ.
    pub fn replace_part(&mut self, index: usize, part: ContentPart) -> Result<ContentPart, EditError> {
        let current = self.part_at(index)?;
        if current.part_type() != part.part_type() {
            return Err(EditError::KindMismatch {
                index,
                expected: part.part_type(),
                actual: current.part_type(),
            });
        }
        let replaced = std::mem::replace(&mut self.parts[index], part);
        self.touch();
        Ok(replaced)
    }

    /// Replace an iteration with a newly built one
    ///
    /// # Errors
    /// Same as [`replace_part`](Self::replace_part).
    pub fn replace_iteration(
        &mut self,
        index: usize,
        iteration: IterationPart,
    ) -> Result<ContentPart, EditError> {
        self.replace_part(index, iteration.into())
    }

    /// Remove a part
    ///
    /// If no text part is left, an empty one is inserted at the front.
    ///
    /// # Errors
    /// Fails if there is no part at `index`.
    pub fn delete_part(&mut self, index: usize) -> Result<ContentPart, EditError> {
        self.part_at(index)?;
        let removed = self.parts.remove(index);
        self.ensure_text_part();
        self.touch();
        Ok(removed)
    }

    /// Remove a variable and the blank text part right after it, if any
    ///
    /// # Errors
    /// Fails if there is no part at `index` or it is not a variable.
    pub fn delete_variable(&mut self, index: usize) -> Result<ContentPart, EditError> {
        let current = self.part_at(index)?;
        if !current.is_variable() {
            return Err(EditError::KindMismatch {
                index,
                expected: ContentPartType::Variable,
                actual: current.part_type(),
            });
        }

        if self.parts.get(index + 1).is_some_and(ContentPart::is_blank_text) {
            self.parts.remove(index + 1);
        }
        let removed = self.parts.remove(index);
        self.ensure_text_part();
        self.touch();
        Ok(removed)
    }

    /// Validate and serialize the working copy
    ///
    /// On success the session is `Persisted` and the stored string is
    /// returned. On failure it is `RejectedWithErrors` and the next edit
    /// returns it to `Editing`.
    ///
    /// # Errors
    /// [`SubmitError::Rejected`] with every validation issue, or
    /// [`SubmitError::Serialize`] if encoding fails.
    pub fn submit(&mut self) -> Result<String, SubmitError> {
        self.transition(SessionState::Validating);
        let content = self.content();
        let report = validate_for_submission(&content);

        if !report.valid {
            tracing::debug!(errors = report.errors.len(), "clause content rejected");
            self.transition(SessionState::RejectedWithErrors);
            self.last_report = Some(report.clone());
            return Err(SubmitError::Rejected(report));
        }

        match serialize_structured_content(&content) {
            Ok(stored) => {
                self.transition(SessionState::Persisted);
                self.last_report = None;
                Ok(stored)
            }
            Err(e) => {
                tracing::error!("failed to serialize validated content: {}", e);
                self.transition(SessionState::Editing);
                Err(e.into())
            }
        }
    }

    fn part_at(&self, index: usize) -> Result<&ContentPart, EditError> {
        self.parts
            .get(index)
            .ok_or_else(|| EditError::out_of_bounds(index, self.parts.len()))
    }

    fn ensure_text_part(&mut self) {
        if !self.parts.iter().any(ContentPart::is_text) {
            self.parts.insert(0, TextPart::empty().into());
        }
    }

    fn touch(&mut self) {
        self.transition(SessionState::Editing);
    }

    fn transition(&mut self, to: SessionState) {
        debug_assert!(
            self.state.can_transition(to),
            "illegal session transition: {:?} -> {:?}",
            self.state,
            to
        );
        tracing::trace!(from = ?self.state, to = ?to, "session transition");
        self.state = to;
    }
}

impl Default for AuthoringSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inmo_catalog::CollectionEntity;
    use pretty_assertions::assert_eq;

    fn text(s: &str) -> ContentPart {
        ContentPart::text(s)
    }

    fn owners() -> IterationPart {
        IterationPart::new(CollectionEntity::Propietarios, "{{nombre}}")
    }

    #[test]
    fn transitions() {
        use SessionState::*;
        assert!(Empty.can_transition(Editing));
        assert!(Validating.can_transition(Persisted));
        assert!(Validating.can_transition(RejectedWithErrors));
        assert!(RejectedWithErrors.can_transition(Editing));
        assert!(!Empty.can_transition(Persisted));
        assert!(!Editing.can_transition(RejectedWithErrors));
        assert!(!Persisted.can_transition(Empty));
    }

    #[test]
    fn new_session_has_one_empty_text() {
        let session = AuthoringSession::new();
        assert_eq!(session.state(), SessionState::Empty);
        assert_eq!(session.parts(), &[text("")]);
    }

    #[test]
    fn empty_content_gets_placeholder_text() {
        let session = AuthoringSession::from_content(StructuredContent::default());
        assert_eq!(session.parts(), &[text("")]);
    }

    #[test]
    fn insert_variable_after_text() {
        let mut session = AuthoringSession::new();
        session.update_text(0, "Ubicado en ").unwrap();
        session.insert_variable("propiedad.direccion");

        assert_eq!(
            session.parts(),
            &[text("Ubicado en "), ContentPart::variable("propiedad.direccion"), text("")]
        );
        assert_eq!(session.state(), SessionState::Editing);
    }

    #[test]
    fn insert_after_non_text_adds_separator() {
        let mut session = AuthoringSession::from_content(StructuredContent::new(vec![
            ContentPart::variable("propiedad.direccion"),
        ]));
        // A text part was synthesized at the front; the variable is still last
        assert_eq!(session.parts().len(), 2);

        session.insert_iteration(owners());
        assert_eq!(
            session.parts(),
            &[
                text(""),
                ContentPart::variable("propiedad.direccion"),
                text(""),
                owners().into(),
                text(""),
            ]
        );
    }

    #[test]
    fn consecutive_inserts_never_touch() {
        let mut session = AuthoringSession::new();
        session.insert_variable("propiedad.direccion");
        session.insert_iteration(owners());
        session.insert_variable("inquilino.nombre");

        for pair in session.parts().windows(2) {
            assert!(pair[0].is_text() || pair[1].is_text(), "adjacent non-text parts: {pair:?}");
        }
    }

    #[test]
    fn update_text_rejects_other_kinds() {
        let mut session = AuthoringSession::new();
        session.insert_variable("propiedad.direccion");

        assert_eq!(
            session.update_text(1, "x"),
            Err(EditError::KindMismatch {
                index: 1,
                expected: ContentPartType::Text,
                actual: ContentPartType::Variable,
            })
        );
        assert_eq!(session.update_text(9, "x"), Err(EditError::out_of_bounds(9, 3)));
    }

    #[test]
    fn replace_iteration_wholesale() {
        let mut session = AuthoringSession::new();
        session.insert_iteration(owners());

        let edited = IterationPart::new(CollectionEntity::Propietarios, "{{nombre}} ({{dni}})")
            .with_separator("; ")
            .with_add_period(false);
        let old = session.replace_iteration(1, edited.clone()).unwrap();

        assert_eq!(old, owners().into());
        assert_eq!(session.parts()[1], edited.into());
    }

    #[test]
    fn replace_requires_same_kind() {
        let mut session = AuthoringSession::new();
        session.insert_iteration(owners());
        let err = session
            .replace_part(1, ContentPart::variable("propiedad.direccion"))
            .unwrap_err();
        assert!(matches!(err, EditError::KindMismatch { index: 1, .. }));
    }

    #[test]
    fn delete_variable_removes_blank_follower() {
        let mut session = AuthoringSession::new();
        session.update_text(0, "Calle ").unwrap();
        session.insert_variable("propiedad.direccion");

        let removed = session.delete_variable(1).unwrap();
        assert_eq!(removed, ContentPart::variable("propiedad.direccion"));
        assert_eq!(session.parts(), &[text("Calle ")]);
    }

    #[test]
    fn delete_variable_keeps_non_blank_follower() {
        let mut session = AuthoringSession::new();
        session.insert_variable("propiedad.direccion");
        session.update_text(2, " número").unwrap();

        session.delete_variable(1).unwrap();
        assert_eq!(session.parts(), &[text(""), text(" número")]);
    }

    #[test]
    fn delete_variable_rejects_other_kinds() {
        let mut session = AuthoringSession::new();
        assert!(matches!(
            session.delete_variable(0),
            Err(EditError::KindMismatch { .. })
        ));
    }

    #[test]
    fn deleting_last_text_synthesizes_one() {
        let mut session = AuthoringSession::from_content(StructuredContent::new(vec![
            text("solo"),
            ContentPart::variable("propiedad.direccion"),
        ]));

        session.delete_part(0).unwrap();
        assert_eq!(
            session.parts(),
            &[text(""), ContentPart::variable("propiedad.direccion")]
        );

        session.delete_part(1).unwrap();
        assert_eq!(session.parts(), &[text("")]);
    }

    #[test]
    fn delete_iteration_leaves_following_text() {
        let mut session = AuthoringSession::new();
        session.insert_iteration(owners());
        session.delete_part(1).unwrap();
        assert_eq!(session.parts(), &[text(""), text("")]);
    }

    #[test]
    fn submit_rejects_then_recovers() {
        let mut session = AuthoringSession::new();
        session.insert_variable("propiedad.color");

        let err = session.submit().unwrap_err();
        let SubmitError::Rejected(report) = err else {
            panic!("expected rejection");
        };
        assert_eq!(report.messages(), vec!["part 2: path 'propiedad.color' is invalid"]);
        assert_eq!(session.state(), SessionState::RejectedWithErrors);
        assert!(session.last_report().is_some());

        session
            .replace_part(1, ContentPart::variable("propiedad.direccion"))
            .unwrap();
        assert_eq!(session.state(), SessionState::Editing);

        let stored = session.submit().unwrap();
        assert_eq!(session.state(), SessionState::Persisted);
        assert!(session.last_report().is_none());
        assert!(stored.starts_with(r#"{"type":"structured""#));
    }

    #[test]
    fn submit_rejects_blank_content() {
        let mut session = AuthoringSession::new();
        assert!(matches!(session.submit(), Err(SubmitError::Rejected(_))));
    }

    #[test]
    fn legacy_text_opens_as_single_text_part() {
        let session = AuthoringSession::from_stored("El inquilino pagará $500");
        assert_eq!(session.parts(), &[text("El inquilino pagará $500")]);
        assert_eq!(session.state(), SessionState::Editing);
    }
}
