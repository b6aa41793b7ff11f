pub mod locktest;
