//! Group, item, edge and type labels shared by the engine and its variants.

// Proposal groups.
pub const DETAILS: &str = "details";
pub const SYSTEM: &str = "system";
pub const BALLOT: &str = "ballot";
pub const BALLOT_OPTIONS: &str = "ballot_options";

// Items.
pub const TITLE: &str = "title";
pub const DESCRIPTION: &str = "description";
pub const BALLOT_TITLE: &str = "ballot_title";
pub const BALLOT_DESCRIPTION: &str = "ballot_description";
pub const NODE_LABEL: &str = "node_label";
pub const TYPE: &str = "type";
pub const PROPOSER: &str = "proposer";
pub const CLIENT_VERSION: &str = "client_version";
pub const CONTRACT_VERSION: &str = "contract_version";
pub const EXPIRATION: &str = "expiration";
pub const APPROVED_DATE: &str = "approved_date";
pub const BALLOT_ID: &str = "ballot_id";
pub const VOTE_POWER: &str = "vote_power";
pub const ORIGINAL_DOCUMENT: &str = "original_document";
pub const PERIOD_COUNT: &str = "period_count";
pub const START_PERIOD: &str = "start_period";
pub const START_TIME: &str = "start_time";

// Ballot options.
pub const OPTION_PASS: &str = "pass";
pub const OPTION_ABSTAIN: &str = "abstain";
pub const OPTION_FAIL: &str = "fail";
pub const BALLOT_DEFAULT_OPTIONS: [&str; 3] = [OPTION_PASS, OPTION_ABSTAIN, OPTION_FAIL];

// Edges.
pub const OWNS: &str = "owns";
pub const OWNED_BY: &str = "ownedby";
pub const PROPOSAL: &str = "proposal";
pub const PASSED_PROPS: &str = "passedprops";
pub const FAILED_PROPS: &str = "failedprops";
pub const VOTE_TALLY: &str = "votetally";
pub const VOTE: &str = "vote";
pub const ORIGINAL: &str = "original";
pub const ASSIGNMENT: &str = "assignment";
pub const NEXT: &str = "next";

// Proposal types.
pub const EDIT: &str = "edit";
pub const EXTENSION: &str = "extension";
