pub(crate) mod date;
pub(crate) mod timezone;

pub(crate) use date::{parse_day, parse_reference};
pub(crate) use timezone::Timezone;
