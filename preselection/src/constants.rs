//! Field names and locale message keys shared with the host application.

/// Issue schema field: explicit open-for-submission flag.
pub const ISSUE_IS_OPEN: &str = "isOpen";

/// Issue schema field: ordered list of designated editor user ids.
pub const ISSUE_EDITED_BY: &str = "editedBy";

/// Submission schema field: issue chosen by the author during submission.
pub const SUBMISSION_PRESELECTED_ISSUE_ID: &str = "preselectedIssueId";

/// Form id of the submission wizard step the issue selector is injected into.
pub const COMMENTS_FOR_EDITORS_FORM: &str = "commentsForTheEditors";

/// Group the injected field is rendered under.
pub const DEFAULT_FIELD_GROUP: &str = "default";

// Message keys, resolved by the host's locale files.
pub const MSG_ISSUE_LABEL: &str = "plugins.generic.issuePreselection.issueLabel";
pub const MSG_ISSUE_FIELD_DESCRIPTION: &str = "plugins.generic.issuePreselection.description.field";
pub const MSG_SELECT_OPTION: &str = "plugins.generic.issuePreselection.selectOption";
pub const MSG_ERROR_ISSUE_REQUIRED: &str = "plugins.generic.issuePreselection.error.issueRequired";
