pub(crate) mod date;
pub(crate) mod interrupt;
pub(crate) mod logging;
pub(crate) mod timezone;

pub(crate) use date::parse_date;
pub(crate) use interrupt::{install_interrupt_handler, is_stopped, sleep_unless_stopped};
pub(crate) use logging::init_logging;
pub(crate) use timezone::Timezone;
