use anchor_lang::prelude::*;
use anchor_lang::solana_program::ed25519_program;
use anchor_lang::solana_program::instruction::Instruction;
use anchor_lang::solana_program::sysvar::instructions::{
    load_current_index_checked, load_instruction_at_checked,
};

use crate::errors::EscrowError;

pub const PUBKEY_SERIALIZED_SIZE: usize = 32;
pub const SIGNATURE_SERIALIZED_SIZE: usize = 64;
pub const SIGNATURE_OFFSETS_SERIALIZED_SIZE: usize = 14;
// num_signatures: u8 followed by one byte of padding
pub const SIGNATURE_OFFSETS_START: usize = 2;
pub const DATA_START: usize = SIGNATURE_OFFSETS_START + SIGNATURE_OFFSETS_SERIALIZED_SIZE;

// Instruction index the precompile reads as "this instruction"
const CURRENT_INSTRUCTION: u16 = u16::MAX;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ed25519SignatureOffsets {
    pub signature_offset: u16,
    pub signature_instruction_index: u16,
    pub public_key_offset: u16,
    pub public_key_instruction_index: u16,
    pub message_data_offset: u16,
    pub message_data_size: u16,
    pub message_instruction_index: u16,
}

impl Ed25519SignatureOffsets {
    fn read(data: &[u8]) -> Self {
        let field = |i: usize| u16::from_le_bytes([data[2 * i], data[2 * i + 1]]);
        Self {
            signature_offset: field(0),
            signature_instruction_index: field(1),
            public_key_offset: field(2),
            public_key_instruction_index: field(3),
            message_data_offset: field(4),
            message_data_size: field(5),
            message_instruction_index: field(6),
        }
    }

    fn write(&self, out: &mut Vec<u8>) {
        for field in [
            self.signature_offset,
            self.signature_instruction_index,
            self.public_key_offset,
            self.public_key_instruction_index,
            self.message_data_offset,
            self.message_data_size,
            self.message_instruction_index,
        ] {
            out.extend_from_slice(&field.to_le_bytes());
        }
    }
}

/// What a single-signature ed25519 precompile instruction attests to.
#[derive(Debug, PartialEq, Eq)]
pub struct SignatureProof<'a> {
    pub signer: Pubkey,
    pub message: &'a [u8],
}

impl<'a> SignatureProof<'a> {
    /// Decode an ed25519 verification instruction laid out as
    /// `[header | offsets | public key | signature | message]`, with every
    /// section stored in the instruction itself.
    pub fn parse(ix: &'a Instruction) -> Result<Self> {
        require!(
            ix.program_id == ed25519_program::ID && ix.accounts.is_empty(),
            EscrowError::NotSigVerified
        );

        let data = ix.data.as_slice();
        require!(data.len() >= DATA_START, EscrowError::InvalidSignatureData);
        require!(data[0] == 1, EscrowError::InvalidSignatureData);

        let offsets = Ed25519SignatureOffsets::read(&data[SIGNATURE_OFFSETS_START..DATA_START]);

        // Data must live in this instruction, not be borrowed from a sibling
        require!(
            offsets.signature_instruction_index == CURRENT_INSTRUCTION
                && offsets.public_key_instruction_index == CURRENT_INSTRUCTION
                && offsets.message_instruction_index == CURRENT_INSTRUCTION,
            EscrowError::InvalidSignatureData
        );

        let public_key_offset = offsets.public_key_offset as usize;
        let signature_offset = offsets.signature_offset as usize;
        let message_offset = offsets.message_data_offset as usize;
        require!(
            public_key_offset == DATA_START
                && signature_offset == public_key_offset + PUBKEY_SERIALIZED_SIZE
                && message_offset == signature_offset + SIGNATURE_SERIALIZED_SIZE,
            EscrowError::InvalidSignatureData
        );

        let message_end = message_offset + offsets.message_data_size as usize;
        require!(message_end == data.len(), EscrowError::InvalidSignatureData);

        let signer = Pubkey::try_from(&data[public_key_offset..signature_offset])
            .map_err(|_| error!(EscrowError::InvalidSignatureData))?;

        Ok(Self {
            signer,
            message: &data[message_offset..message_end],
        })
    }

    pub fn ensure(&self, expected_signer: &Pubkey, expected_message: &[u8]) -> Result<()> {
        require_keys_eq!(self.signer, *expected_signer, EscrowError::SignerMismatch);
        require!(
            self.message == expected_message,
            EscrowError::MessageMismatch
        );
        Ok(())
    }
}

/// Check that `previous`, the instruction executed right before the caller,
/// proves `expected_signer` signed `expected_message`.
pub fn verify_proof(
    previous: Option<&Instruction>,
    expected_signer: &Pubkey,
    expected_message: &[u8],
) -> Result<()> {
    let ix = previous.ok_or(EscrowError::MissingSignatureProof)?;
    let proof = SignatureProof::parse(ix)?;
    msg!("Message signer: {}", proof.signer);
    proof.ensure(expected_signer, expected_message)
}

/// Fetch the instruction preceding the currently executing one from the
/// instructions sysvar. `None` when the current instruction is first.
pub fn load_preceding_instruction(instructions: &AccountInfo) -> Result<Option<Instruction>> {
    let current = load_current_index_checked(instructions)?;
    if current == 0 {
        return Ok(None);
    }
    let previous = load_instruction_at_checked(current as usize - 1, instructions)?;
    Ok(Some(previous))
}

/// Build the ed25519 precompile instruction the withdraw expects in front of it.
pub fn build_ed25519_instruction(
    signer: &Pubkey,
    signature: &[u8; SIGNATURE_SERIALIZED_SIZE],
    message: &[u8],
) -> Instruction {
    let public_key_offset = DATA_START;
    let signature_offset = public_key_offset + PUBKEY_SERIALIZED_SIZE;
    let message_data_offset = signature_offset + SIGNATURE_SERIALIZED_SIZE;

    let offsets = Ed25519SignatureOffsets {
        signature_offset: signature_offset as u16,
        signature_instruction_index: CURRENT_INSTRUCTION,
        public_key_offset: public_key_offset as u16,
        public_key_instruction_index: CURRENT_INSTRUCTION,
        message_data_offset: message_data_offset as u16,
        message_data_size: message.len() as u16,
        message_instruction_index: CURRENT_INSTRUCTION,
    };

    let mut data = Vec::with_capacity(message_data_offset + message.len());
    data.extend_from_slice(&[1, 0]);
    offsets.write(&mut data);
    data.extend_from_slice(signer.as_ref());
    data.extend_from_slice(signature);
    data.extend_from_slice(message);

    Instruction {
        program_id: ed25519_program::ID,
        accounts: vec![],
        data,
    }
}
