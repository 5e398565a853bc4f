mod domain_list_source;
mod domain_set_store;
mod response_writer;
mod upstream_transport;

pub use domain_list_source::DomainListSource;
pub use domain_set_store::DomainSetStore;
pub use response_writer::ResponseWriter;
pub use upstream_transport::UpstreamTransport;
