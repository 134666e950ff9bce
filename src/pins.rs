//! GPIO / peripheral assignments for the station board.
//!
//! Drivers and config reference this module rather than hard-coding
//! numbers.

// ---------------------------------------------------------------------------
// Status LED
// ---------------------------------------------------------------------------

/// On-board blue LED. HIGH = station holds an IP address.
pub const STATUS_LED_GPIO: i32 = 2;

// ---------------------------------------------------------------------------
// UART console
// ---------------------------------------------------------------------------

/// UART0 is wired to the USB-serial bridge on DevKit boards.
pub const CONSOLE_UART_PORT: i32 = 0;
pub const CONSOLE_BAUD_RATE: u32 = 115_200;
/// Driver RX ring buffer. Must exceed the 128-byte hardware FIFO.
pub const CONSOLE_RX_BUFFER_LEN: usize = 256;
