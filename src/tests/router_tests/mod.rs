mod analytics_tests;
mod building_tests;
mod help_tests;
mod misc_tests;
mod report_tests;
