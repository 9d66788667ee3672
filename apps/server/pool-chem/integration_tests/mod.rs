mod helpers;
mod report_route;
mod static_files;
