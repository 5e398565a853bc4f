mod route_query;

pub use route_query::RouteQueryUseCase;
