pub mod assessments;
pub mod attendance;
pub mod grade_scales;
pub mod periods;
pub mod reports;
