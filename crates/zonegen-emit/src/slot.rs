//! The fixed emission points at which the classifier's role is consulted
//! for one parameter.
//!
//! The method state machine (`DeclareLocals -> MarshalIn -> Send ->
//! UnmarshalOut -> CleanupIn -> Return`) groups several of these slots: e.g.
//! `DeclareLocals` covers both `ProxyOutDeclaration` (proxy side) and
//! `StubDemarshallDeclaration` (stub side).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    ProxyPrepareIn,
    ProxyPrepareInInterfaceId,
    ProxyMarshalIn,
    ProxyOutDeclaration,
    ProxyMarshalOut,
    ProxyValueReturn,
    ProxyCleanIn,

    StubDemarshalDeclaration,
    StubMarshalIn,
    StubParamWrap,
    StubParamCast,
    StubAddRefOutPredeclare,
    StubAddRefOut,
    StubMarshalOut,
}
