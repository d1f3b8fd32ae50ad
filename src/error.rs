use std::io;

/// Reasons a program image can't be put into RAM
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("program is too large ({size} bytes), max size is {max} bytes")]
    TooLarge { size: usize, max: usize },

    #[error("couldn't read program: {0}")]
    Io(#[from] io::Error),
}

/// The host's devices don't fit the machine
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("display takes {display} bytes per frame, framebuffer is {framebuffer}")]
    DisplaySize { display: usize, framebuffer: usize },
}
