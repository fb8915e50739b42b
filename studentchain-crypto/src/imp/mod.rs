pub mod hasher;

#[cfg(test)]
mod test;
