use crate::errors::GameError;
use crate::player::Action as A;

/// Validates a human player's action against the bet level and their stack.
///
/// Returns the action to apply, which may be normalised: a raise of the
/// whole stack (or more) becomes [`A::AllIn`].
///
/// # Arguments
///
/// * `stack` - Player's remaining chip stack
/// * `to_call` - Chips needed to match the bet level
/// * `action` - The action the player wishes to perform
///
/// # Errors
///
/// - [`GameError::CheckFacingBet`] - Player tries to check when facing a bet
/// - [`GameError::InvalidBetAmount`] - Raise that does not exceed the call amount
///
/// # Examples
///
/// ```
/// use trainer_engine::rules::validate_action;
/// use trainer_engine::player::Action;
///
/// assert_eq!(validate_action(1000, 20, Action::Call), Ok(Action::Call));
/// // Raising more than the stack is an all-in
/// assert_eq!(validate_action(80, 20, Action::Raise(100)), Ok(Action::AllIn));
/// ```
///
/// ```
/// use trainer_engine::rules::validate_action;
/// use trainer_engine::player::Action;
/// use trainer_engine::errors::GameError;
///
/// let result = validate_action(1000, 50, Action::Check);
/// assert!(matches!(result, Err(GameError::CheckFacingBet { to_call: 50 })));
///
/// let result = validate_action(1000, 50, Action::Raise(50));
/// assert!(matches!(result, Err(GameError::InvalidBetAmount { .. })));
/// ```
pub fn validate_action(stack: u32, to_call: u32, action: A) -> Result<A, GameError> {
    match action {
        A::Fold => Ok(A::Fold),
        A::Check => {
            if to_call == 0 {
                Ok(A::Check)
            } else {
                Err(GameError::CheckFacingBet { to_call })
            }
        }
        A::Call => Ok(A::Call),
        A::Raise(amount) => {
            if amount >= stack && stack > 0 {
                Ok(A::AllIn)
            } else if amount <= to_call {
                Err(GameError::InvalidBetAmount {
                    amount,
                    minimum: to_call + 1,
                })
            } else {
                Ok(A::Raise(amount))
            }
        }
        A::AllIn => Ok(A::AllIn),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_raise_is_invalid() {
        let err = validate_action(10_000, 0, A::Raise(0)).unwrap_err();
        assert_eq!(
            err,
            GameError::InvalidBetAmount {
                amount: 0,
                minimum: 1
            }
        );
    }

    #[test]
    fn check_is_fine_when_matched() {
        assert_eq!(validate_action(500, 0, A::Check), Ok(A::Check));
    }

    #[test]
    fn short_stack_raise_becomes_allin_without_error() {
        // stack=30 cannot even cover the call; raising shoves
        assert_eq!(validate_action(30, 100, A::Raise(30)), Ok(A::AllIn));
    }
}
