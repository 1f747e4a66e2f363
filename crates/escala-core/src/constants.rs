/// Route component constants shared across crates
pub const API_ROUTE_COMPONENT: &str = "api";
pub const API_ROUTE_PREFIX: &str = const_str::concat!("/", API_ROUTE_COMPONENT);

pub const APP_ROUTE_COMPONENT: &str = "app";
pub const APP_ROUTE_PREFIX: &str = const_str::concat!(API_ROUTE_PREFIX, "/", APP_ROUTE_COMPONENT);

pub const BOARD_ROUTE_COMPONENT: &str = "board";
pub const BOARD_ROUTE_PREFIX: &str =
    const_str::concat!(API_ROUTE_PREFIX, "/", BOARD_ROUTE_COMPONENT);

pub const SHIFTS_ROUTE_COMPONENT: &str = "shifts";
pub const SHIFTS_ROUTE_PREFIX: &str =
    const_str::concat!(API_ROUTE_PREFIX, "/", SHIFTS_ROUTE_COMPONENT);

pub const EMPLOYEES_ROUTE_COMPONENT: &str = "employees";
pub const EMPLOYEES_ROUTE_PREFIX: &str =
    const_str::concat!(API_ROUTE_PREFIX, "/", EMPLOYEES_ROUTE_COMPONENT);

pub const EXPORT_ROUTE_COMPONENT: &str = "export";
pub const EXPORT_ROUTE_PREFIX: &str =
    const_str::concat!(API_ROUTE_PREFIX, "/", EXPORT_ROUTE_COMPONENT);

/// Time zone used to resolve "today" when none is configured
pub const DEFAULT_TIMEZONE: &str = "America/Sao_Paulo";
