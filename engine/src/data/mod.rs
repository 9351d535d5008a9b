// Input decoding: goal requests (JSON) and contribution history (CSV)
pub mod contribution_csv;
pub mod goal_input;
