pub mod answer_normalizer;
pub mod attempt_service;
pub mod attempt_session;
pub mod grading_service;
pub mod quiz_service;
pub mod randomizer;
pub mod result_recorder;
pub mod seed;
pub mod session_timer;
