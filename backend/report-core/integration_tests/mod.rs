mod helpers;
mod http_transport;
mod translator;
