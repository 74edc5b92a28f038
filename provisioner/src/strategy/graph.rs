//! Acquisition dependency graph
//!
//! Each symbol declares the symbols its strategy may request
//! ([`AssetSymbol::prerequisites`]). The dispatcher refuses any request outside
//! that declaration, so checking the declarations for cycles here is enough to
//! know no resolution can recurse on itself.

use crate::{
    types::AssetSymbol,
    utils::error::{ResolverError, ResolverResult},
};

#[derive(Clone, Copy, PartialEq)]
enum Mark {
    Visiting,
    Done,
}

fn visit(
    symbol: &AssetSymbol,
    marks: &mut Vec<(AssetSymbol, Mark)>,
    stack: &mut Vec<AssetSymbol>,
    order: &mut Vec<AssetSymbol>,
) -> ResolverResult<()> {
    match marks.iter().find(|(marked, _)| marked == symbol) {
        Some((_, Mark::Done)) => return Ok(()),
        Some((_, Mark::Visiting)) => return Err(ResolverError::cyclic(symbol, stack)),
        None => {}
    }

    marks.push((symbol.clone(), Mark::Visiting));
    stack.push(symbol.clone());
    for prerequisite in symbol.prerequisites() {
        visit(prerequisite, marks, stack, order)?;
    }
    stack.pop();

    if let Some(entry) = marks.iter_mut().find(|(marked, _)| marked == symbol) {
        entry.1 = Mark::Done;
    }
    order.push(symbol.clone());
    Ok(())
}

/// Symbols that may be acquired while acquiring `symbol`, prerequisites first, `symbol` last.
pub fn resolution_order(symbol: &AssetSymbol) -> ResolverResult<Vec<AssetSymbol>> {
    let mut order = vec![];
    visit(symbol, &mut vec![], &mut vec![], &mut order)?;
    Ok(order)
}

/// Fails with `CyclicDependency` if any acquirable symbol transitively depends on itself.
pub fn verify_acyclic() -> ResolverResult<()> {
    let mut marks = vec![];
    let mut order = vec![];
    for symbol in AssetSymbol::ACQUIRABLE.iter() {
        visit(symbol, &mut marks, &mut vec![], &mut order)?;
    }
    Ok(())
}
