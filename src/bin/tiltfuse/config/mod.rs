pub mod sys_config;
