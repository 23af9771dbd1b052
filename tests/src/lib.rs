#![cfg(test)]

mod catalogo;
mod empresas;
mod mock;
